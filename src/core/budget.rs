use anyhow::{Result, anyhow};

/// Column contract of the `gerarorcamentofinanceirogrid` grid. Header names
/// in the spreadsheet must match these exactly; the same names become the
/// item tags on the wire.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "numPrj", "mesAno", "codFpj", "ctaFin", "codCcu", "vlrCpf", "vlrCxf",
];

/// One budget grid row as the ERP expects it.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    /// Project number (numPrj)
    pub project: String,
    /// Competence month, MM/YYYY (mesAno)
    pub month: String,
    /// Project phase code (codFpj)
    pub phase: String,
    /// Financial account (ctaFin)
    pub account: String,
    /// Cost center (codCcu)
    pub cost_center: String,
    /// Budgeted amount (vlrCpf)
    pub amount: f64,
    /// Cash-flow amount (vlrCxf)
    pub cash_amount: f64,
}

impl BudgetLine {
    /// Builds a line from raw cell values in `REQUIRED_COLUMNS` order.
    pub fn from_record(cells: &[&str]) -> Result<Self> {
        if cells.len() != REQUIRED_COLUMNS.len() {
            return Err(anyhow!(
                "Expected {} values, got {}",
                REQUIRED_COLUMNS.len(),
                cells.len()
            ));
        }

        let field = |idx: usize| -> Result<String> {
            let value = cells[idx].trim();
            if value.is_empty() {
                return Err(anyhow!("Column '{}' is empty", REQUIRED_COLUMNS[idx]));
            }
            Ok(value.to_string())
        };

        let month = field(1)?;
        validate_month(&month)?;

        Ok(BudgetLine {
            project: field(0)?,
            month,
            phase: field(2)?,
            account: field(3)?,
            cost_center: field(4)?,
            amount: parse_amount(cells[5])
                .map_err(|e| anyhow!("Column 'vlrCpf': {e}"))?,
            cash_amount: parse_amount(cells[6])
                .map_err(|e| anyhow!("Column 'vlrCxf': {e}"))?,
        })
    }

    /// Cell values in wire order, amounts with two decimal places.
    pub fn wire_values(&self) -> [String; 7] {
        [
            self.project.clone(),
            self.month.clone(),
            self.phase.clone(),
            self.account.clone(),
            self.cost_center.clone(),
            format!("{:.2}", self.amount),
            format!("{:.2}", self.cash_amount),
        ]
    }
}

/// Parses an amount in either plain decimal form (`15000.00`) or Brazilian
/// format (`15.000,00`). A comma marks the Brazilian form; dots are then
/// thousands separators.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("value is empty"));
    }

    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    normalized
        .parse::<f64>()
        .map_err(|_| anyhow!("'{trimmed}' is not a number"))
}

/// Checks the MM/YYYY competence format with a valid month.
pub fn validate_month(value: &str) -> Result<()> {
    let parts: Vec<&str> = value.split('/').collect();
    let valid = match parts.as_slice() {
        [month, year] if month.len() == 2 && year.len() == 4 => {
            matches!(month.parse::<u32>(), Ok(1..=12)) && year.parse::<u32>().is_ok()
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(anyhow!("'{value}' is not a valid MM/YYYY competence"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_plain_decimal() {
        assert_eq!(parse_amount("15000.00").unwrap(), 15000.0);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
        assert_eq!(parse_amount(" 42.5 ").unwrap(), 42.5);
    }

    #[test]
    fn test_parse_amount_brazilian_format() {
        assert_eq!(parse_amount("15.000,00").unwrap(), 15000.0);
        assert_eq!(parse_amount("1.234.567,89").unwrap(), 1234567.89);
        assert_eq!(parse_amount("0,50").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("12,34,56").is_err());
    }

    #[test]
    fn test_validate_month() {
        assert!(validate_month("07/2025").is_ok());
        assert!(validate_month("12/1999").is_ok());
        assert!(validate_month("13/2025").is_err());
        assert!(validate_month("00/2025").is_err());
        assert!(validate_month("7/2025").is_err());
        assert!(validate_month("07-2025").is_err());
        assert!(validate_month("2025/07").is_err());
    }

    #[test]
    fn test_from_record() {
        let line = BudgetLine::from_record(&[
            "101", "07/2025", "1", "1002", "1002", "15.000,00", "0",
        ])
        .unwrap();
        assert_eq!(line.project, "101");
        assert_eq!(line.month, "07/2025");
        assert_eq!(line.amount, 15000.0);
        assert_eq!(line.cash_amount, 0.0);
    }

    #[test]
    fn test_from_record_rejects_empty_field() {
        let result =
            BudgetLine::from_record(&["101", "07/2025", "", "1002", "1002", "1", "0"]);
        assert!(result.unwrap_err().to_string().contains("codFpj"));
    }

    #[test]
    fn test_wire_values_format_amounts() {
        let line = BudgetLine::from_record(&[
            "101", "07/2025", "1", "1002", "1002", "15000", "0,5",
        ])
        .unwrap();
        let values = line.wire_values();
        assert_eq!(values[5], "15000.00");
        assert_eq!(values[6], "0.50");
    }
}
