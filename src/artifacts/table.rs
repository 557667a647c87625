//! Report table parsing (comma-separated, header row, one customer per line)

use crate::models::{ChurnReportRow, ReportDataset};

const REQUIRED_COLUMNS: [&str; 8] = [
    "customerID",
    "Actual_Churn",
    "Predicted_Churn",
    "Churn_Probability",
    "tenure",
    "Contract",
    "InternetService",
    "MonthlyCharges",
];

/// Column positions of the required fields within a header
struct ColumnIndex([usize; REQUIRED_COLUMNS.len()]);

impl ColumnIndex {
    fn from_header(header: &[String]) -> Result<Self, String> {
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = header
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| format!("missing column '{}'", name))?;
        }
        Ok(Self(positions))
    }

    fn field<'a>(&self, fields: &'a [String], column: usize) -> Result<&'a str, String> {
        let pos = self.0[column];
        fields
            .get(pos)
            .map(|f| f.trim())
            .ok_or_else(|| format!("missing value for '{}'", REQUIRED_COLUMNS[column]))
    }
}

/// Parse the report table into a dataset
pub fn parse_report(text: &str) -> Result<ReportDataset, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header) = lines.next().ok_or_else(|| "file is empty".to_string())?;
    let index = ColumnIndex::from_header(&split_record(header))?;

    let mut rows = Vec::new();
    for (i, line) in lines {
        let fields = split_record(line);
        let row = parse_row(&index, &fields).map_err(|e| format!("line {}: {}", i + 1, e))?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err("table has no customer rows".to_string());
    }

    ReportDataset::from_rows(rows)
}

fn parse_row(index: &ColumnIndex, fields: &[String]) -> Result<ChurnReportRow, String> {
    let customer_id = index.field(fields, 0)?;
    if customer_id.is_empty() {
        return Err("empty customerID".to_string());
    }

    let churn_probability = parse_f64(index.field(fields, 3)?, "Churn_Probability")?;
    if !(0.0..=1.0).contains(&churn_probability) {
        return Err(format!("Churn_Probability {} outside [0, 1]", churn_probability));
    }

    let monthly_charges = parse_f64(index.field(fields, 7)?, "MonthlyCharges")?;
    if monthly_charges < 0.0 {
        return Err(format!("negative MonthlyCharges {}", monthly_charges));
    }

    Ok(ChurnReportRow {
        customer_id: customer_id.to_string(),
        actual_churn: parse_flag(index.field(fields, 1)?, "Actual_Churn")?,
        predicted_churn: parse_flag(index.field(fields, 2)?, "Predicted_Churn")?,
        churn_probability,
        tenure: parse_months(index.field(fields, 4)?)?,
        contract: index.field(fields, 5)?.parse()?,
        internet_service: index.field(fields, 6)?.parse()?,
        monthly_charges,
    })
}

fn parse_f64(value: &str, column: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        // -0 becomes 0
        .map(|v| v + 0.0)
        .ok_or_else(|| format!("invalid {} '{}'", column, value))
}

fn parse_flag(value: &str, column: &str) -> Result<bool, String> {
    match value {
        "1" | "1.0" | "true" | "True" | "TRUE" | "Yes" => Ok(true),
        "0" | "0.0" | "false" | "False" | "FALSE" | "No" => Ok(false),
        other => Err(format!("invalid {} '{}'", column, other)),
    }
}

/// Whole months; exporters sometimes write integral floats such as `12.0`
fn parse_months(value: &str) -> Result<u32, String> {
    if let Ok(months) = value.parse::<u32>() {
        return Ok(months);
    }
    match value.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => Ok(v as u32),
        _ => Err(format!("invalid tenure '{}'", value)),
    }
}

/// Split one line into fields, honouring double quotes and `""` escapes
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
