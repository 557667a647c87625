//! Customer report model

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Contract term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Contract {
    #[serde(rename = "Month-to-month")]
    MonthToMonth,
    #[serde(rename = "One year")]
    OneYear,
    #[serde(rename = "Two year")]
    TwoYear,
}

impl Contract {
    /// Display order used by the contract chart
    pub const ORDER: [Contract; 3] = [Contract::MonthToMonth, Contract::OneYear, Contract::TwoYear];

    pub fn as_str(&self) -> &'static str {
        match self {
            Contract::MonthToMonth => "Month-to-month",
            Contract::OneYear => "One year",
            Contract::TwoYear => "Two year",
        }
    }
}

impl FromStr for Contract {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Month-to-month" => Ok(Contract::MonthToMonth),
            "One year" => Ok(Contract::OneYear),
            "Two year" => Ok(Contract::TwoYear),
            other => Err(format!("unknown Contract '{}'", other)),
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Internet service type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternetService {
    #[serde(rename = "DSL")]
    Dsl,
    #[serde(rename = "Fiber optic")]
    FiberOptic,
    #[serde(rename = "No")]
    NoService,
}

impl InternetService {
    pub fn as_str(&self) -> &'static str {
        match self {
            InternetService::Dsl => "DSL",
            InternetService::FiberOptic => "Fiber optic",
            InternetService::NoService => "No",
        }
    }
}

impl FromStr for InternetService {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "DSL" => Ok(InternetService::Dsl),
            "Fiber optic" => Ok(InternetService::FiberOptic),
            "No" => Ok(InternetService::NoService),
            other => Err(format!("unknown InternetService '{}'", other)),
        }
    }
}

impl fmt::Display for InternetService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One customer record from the report artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnReportRow {
    #[serde(rename = "customerID")]
    pub customer_id: String,
    #[serde(rename = "Actual_Churn")]
    pub actual_churn: bool,
    #[serde(rename = "Predicted_Churn")]
    pub predicted_churn: bool,
    #[serde(rename = "Churn_Probability")]
    pub churn_probability: f64,
    pub tenure: u32,
    #[serde(rename = "Contract")]
    pub contract: Contract,
    #[serde(rename = "InternetService")]
    pub internet_service: InternetService,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
}

/// Ordered, immutable collection of report rows with unique customer ids
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportDataset {
    rows: Vec<ChurnReportRow>,
}

impl ReportDataset {
    /// Build a dataset, rejecting duplicate customer ids
    pub fn from_rows(rows: Vec<ChurnReportRow>) -> Result<Self, String> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !seen.insert(row.customer_id.as_str()) {
                return Err(format!("duplicate customerID '{}'", row.customer_id));
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[ChurnReportRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::row;
    use super::*;

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = ReportDataset::from_rows(vec![row("A", 0.1), row("A", 0.2)]).unwrap_err();
        assert!(err.contains("duplicate customerID 'A'"));
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("One year".parse::<Contract>().unwrap(), Contract::OneYear);
        assert_eq!(" Fiber optic ".parse::<InternetService>().unwrap(), InternetService::FiberOptic);
        assert!("Weekly".parse::<Contract>().is_err());
        assert_eq!(InternetService::NoService.to_string(), "No");
    }

    #[test]
    fn test_row_serializes_with_report_column_names() {
        let json = serde_json::to_value(row("7590-VHVEG", 0.42)).unwrap();
        assert_eq!(json["customerID"], "7590-VHVEG");
        assert_eq!(json["Contract"], "Month-to-month");
        assert_eq!(json["InternetService"], "Fiber optic");
    }
}
