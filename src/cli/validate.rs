use super::ui;
use crate::core::budget::{BudgetLine, REQUIRED_COLUMNS};
use crate::sheet;
use anyhow::Result;
use comfy_table::Cell;
use std::path::Path;

const PREVIEW_ROWS: usize = 10;

/// Loads the spreadsheet and prints a preview; fails on any validation error.
pub fn run<P: AsRef<Path>>(sheet_path: P) -> Result<()> {
    let lines = sheet::load(&sheet_path)?;

    println!(
        "{} {} record(s)",
        ui::style_text("Spreadsheet is valid:", ui::StyleType::TotalValue),
        lines.len()
    );
    println!("{}", preview_table(&lines));

    if lines.len() > PREVIEW_ROWS {
        println!(
            "{}",
            ui::style_text(
                &format!("... and {} more row(s)", lines.len() - PREVIEW_ROWS),
                ui::StyleType::Subtle
            )
        );
    }
    Ok(())
}

fn preview_table(lines: &[BudgetLine]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(REQUIRED_COLUMNS.iter().map(|c| ui::header_cell(c)));

    for line in lines.iter().take(PREVIEW_ROWS) {
        table.add_row(line.wire_values().map(Cell::new));
    }
    table.to_string()
}
