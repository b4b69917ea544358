//! Spreadsheet loading for the budget grid.
//!
//! Reads `;`-, `,`- or tab-separated CSV/TXT files, auto-detecting the
//! delimiter, and maps rows onto the fixed column contract.

use anyhow::{Context, Result, anyhow};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

use crate::core::budget::{BudgetLine, REQUIRED_COLUMNS};

/// Loads and validates a budget spreadsheet.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<BudgetLine>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read spreadsheet: {}", path.display()))?;
    parse(&bytes).with_context(|| format!("Invalid spreadsheet: {}", path.display()))
}

/// Parses spreadsheet bytes into budget lines.
pub fn parse(bytes: &[u8]) -> Result<Vec<BudgetLine>> {
    let content = decode(bytes);
    let delimiter = detect_delimiter(&content);
    debug!(delimiter = %(delimiter as char), "Detected spreadsheet delimiter");

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(false)
        .from_reader(content.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record.context("Failed to parse header row")?,
        None => return Err(anyhow!("Spreadsheet is empty")),
    };

    let headers: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();
    let column_indexes = map_columns(&headers)?;

    let mut lines = Vec::new();
    for (idx, record) in records.enumerate() {
        // Header is line 1, so data starts at line 2.
        let line_no = idx + 2;
        let record =
            record.with_context(|| format!("Failed to parse line {line_no}"))?;

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let cells: Vec<&str> = column_indexes
            .iter()
            .map(|&i| record.get(i).unwrap_or(""))
            .collect();
        let line = BudgetLine::from_record(&cells)
            .with_context(|| format!("Invalid row at line {line_no}"))?;
        lines.push(line);
    }

    if lines.is_empty() {
        return Err(anyhow!("Spreadsheet has no data rows"));
    }

    Ok(lines)
}

/// Decodes bytes as UTF-8, dropping a leading BOM if present.
fn decode(bytes: &[u8]) -> String {
    let without_bom = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(without_bom).into_owned()
}

/// Picks the delimiter whose column count is largest and most consistent
/// over the first lines of the file.
fn detect_delimiter(content: &str) -> u8 {
    let lines: Vec<&str> = content.lines().take(10).collect();

    let mut best = b';';
    let mut best_score = 0usize;
    for delim in [b';', b',', b'\t'] {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| line.matches(delim as char).count())
            .collect();
        let first = counts.first().copied().unwrap_or(0);
        if first == 0 {
            continue;
        }
        let consistent = counts.iter().filter(|&&c| c == first).count();
        let score = first * consistent;
        if score > best_score {
            best_score = score;
            best = delim;
        }
    }
    best
}

/// Resolves the position of each required column, reporting every missing
/// column in one error.
fn map_columns(headers: &[String]) -> Result<Vec<usize>> {
    let mut indexes = Vec::with_capacity(REQUIRED_COLUMNS.len());
    let mut missing = Vec::new();

    for column in REQUIRED_COLUMNS {
        match headers.iter().position(|h| h == column) {
            Some(idx) => indexes.push(idx),
            None => missing.push(column),
        }
    }

    if !missing.is_empty() {
        return Err(anyhow!("Missing required columns: {}", missing.join(", ")));
    }
    Ok(indexes)
}
