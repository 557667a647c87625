//! High-risk customer selection

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::customer::{ChurnReportRow, Contract, InternetService, ReportDataset};
use crate::config::TopNBounds;
use crate::error::{AppError, AppResult};
use crate::format;

/// Display projection of a report row for the contact list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighRiskCustomer {
    #[serde(rename = "customerID")]
    pub customer_id: String,
    /// Probability rendered as a two-decimal percentage
    #[serde(rename = "Churn_Probability")]
    pub churn_probability: String,
    pub tenure: u32,
    #[serde(rename = "Contract")]
    pub contract: Contract,
    #[serde(rename = "InternetService")]
    pub internet_service: InternetService,
    #[serde(rename = "MonthlyCharges")]
    pub monthly_charges: f64,
}

impl From<&ChurnReportRow> for HighRiskCustomer {
    fn from(row: &ChurnReportRow) -> Self {
        Self {
            customer_id: row.customer_id.clone(),
            churn_probability: format::percent(row.churn_probability, 2),
            tenure: row.tenure,
            contract: row.contract,
            internet_service: row.internet_service,
            monthly_charges: row.monthly_charges,
        }
    }
}

/// Column of the contact list the user can sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortColumn {
    #[serde(rename = "customerID")]
    CustomerId,
    #[default]
    #[serde(rename = "Churn_Probability")]
    ChurnProbability,
    #[serde(rename = "tenure")]
    Tenure,
    #[serde(rename = "Contract")]
    Contract,
    #[serde(rename = "InternetService")]
    InternetService,
    #[serde(rename = "MonthlyCharges")]
    MonthlyCharges,
}

impl SortColumn {
    /// Display order of the table columns
    pub const ALL: [SortColumn; 6] = [
        SortColumn::CustomerId,
        SortColumn::ChurnProbability,
        SortColumn::Tenure,
        SortColumn::Contract,
        SortColumn::InternetService,
        SortColumn::MonthlyCharges,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::CustomerId => "customerID",
            SortColumn::ChurnProbability => "Churn_Probability",
            SortColumn::Tenure => "tenure",
            SortColumn::Contract => "Contract",
            SortColumn::InternetService => "InternetService",
            SortColumn::MonthlyCharges => "MonthlyCharges",
        }
    }

    /// Order applied on the first click of a column header
    pub fn first_order(&self) -> SortOrder {
        match self {
            SortColumn::ChurnProbability | SortColumn::Tenure | SortColumn::MonthlyCharges => {
                SortOrder::Desc
            }
            _ => SortOrder::Asc,
        }
    }

    fn compare(&self, a: &ChurnReportRow, b: &ChurnReportRow) -> Ordering {
        match self {
            SortColumn::CustomerId => a.customer_id.cmp(&b.customer_id),
            SortColumn::ChurnProbability => a
                .churn_probability
                .partial_cmp(&b.churn_probability)
                .unwrap_or(Ordering::Equal),
            SortColumn::Tenure => a.tenure.cmp(&b.tenure),
            // contract length, not alphabetical
            SortColumn::Contract => contract_rank(a.contract).cmp(&contract_rank(b.contract)),
            SortColumn::InternetService => a.internet_service.as_str().cmp(b.internet_service.as_str()),
            SortColumn::MonthlyCharges => a
                .monthly_charges
                .partial_cmp(&b.monthly_charges)
                .unwrap_or(Ordering::Equal),
        }
    }
}

fn contract_rank(contract: Contract) -> Option<usize> {
    Contract::ORDER.iter().position(|c| *c == contract)
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown sort column '{}'", s))
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn reversed(&self) -> SortOrder {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display ordering of the contact list. Defaults to highest risk first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TableSort {
    pub column: SortColumn,
    pub order: SortOrder,
}

impl TableSort {
    /// Stable: rows that compare equal keep their current order
    fn apply(&self, rows: &mut [&ChurnReportRow]) {
        rows.sort_by(|a, b| match self.order {
            SortOrder::Asc => self.column.compare(a, b),
            SortOrder::Desc => self.column.compare(b, a),
        });
    }
}

impl ReportDataset {
    /// Rows ordered by descending churn probability, ties kept in source order.
    /// Returns at most `n` rows; the dataset itself is left untouched.
    pub fn rank_by_risk(&self, n: usize) -> Vec<&ChurnReportRow> {
        let mut ranked: Vec<&ChurnReportRow> = self.rows().iter().collect();
        // sort_by is stable; partial_cmp keeps -0 and 0 equal
        ranked.sort_by(|a, b| {
            b.churn_probability
                .partial_cmp(&a.churn_probability)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(n);
        ranked
    }

    /// Select the `n` highest-risk customers for display, then order them by
    /// `sort`. The sort never changes which customers are selected.
    pub fn select_top_risk(
        &self,
        n: i64,
        bounds: &TopNBounds,
        sort: TableSort,
    ) -> AppResult<Vec<HighRiskCustomer>> {
        if !bounds.contains(n) {
            return Err(AppError::InvalidN {
                n,
                min: bounds.min,
                max: bounds.max,
            });
        }

        let n = usize::try_from(n).map_err(|e| AppError::InternalError(e.to_string()))?;
        let mut selected = self.rank_by_risk(n);
        sort.apply(&mut selected);
        Ok(selected.into_iter().map(HighRiskCustomer::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::fixtures::{dataset, row};

    #[test]
    fn test_top_two_of_three() {
        let ds = dataset(&[0.9, 0.2, 0.5]);
        let ranked = ds.rank_by_risk(2);
        let probs: Vec<f64> = ranked.iter().map(|r| r.churn_probability).collect();
        assert_eq!(probs, vec![0.9, 0.5]);
    }

    #[test]
    fn test_clamped_not_padded() {
        let ds = dataset(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 0.95]);
        let bounds = TopNBounds::new(5, 100, 10).unwrap();

        let top = ds.select_top_risk(100, &bounds, TableSort::default()).unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].churn_probability, "95.00%");
        assert_eq!(top[9].churn_probability, "10.00%");
    }

    #[test]
    fn test_length_is_min_of_n_and_len() {
        let bounds = TopNBounds::default();
        for size in [0usize, 3, 5, 12, 60] {
            let probs: Vec<f64> = (0..size).map(|i| (i % 7) as f64 / 7.0).collect();
            let ds = dataset(&probs);
            for n in [5i64, 10, 33, 50] {
                let top = ds.select_top_risk(n, &bounds, TableSort::default()).unwrap();
                assert_eq!(top.len(), (n as usize).min(size));
            }
        }
    }

    #[test]
    fn test_sorted_descending() {
        let probs: Vec<f64> = (0..40).map(|i| ((i * 37) % 101) as f64 / 100.0).collect();
        let ds = dataset(&probs);
        let ranked = ds.rank_by_risk(25);
        for pair in ranked.windows(2) {
            assert!(pair[0].churn_probability >= pair[1].churn_probability);
        }
    }

    #[test]
    fn test_ties_keep_source_order() {
        let ds = ReportDataset::from_rows(vec![
            row("first", 0.7),
            row("low", 0.1),
            row("second", 0.7),
            row("third", 0.7),
        ])
        .unwrap();

        let ids: Vec<&str> = ds.rank_by_risk(3).iter().map(|r| r.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_signed_zero_ties_keep_source_order() {
        let ds = ReportDataset::from_rows(vec![row("A", -0.0), row("B", 0.0)]).unwrap();
        let ids: Vec<&str> = ds.rank_by_risk(2).iter().map(|r| r.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_source_not_mutated() {
        let ds = dataset(&[0.1, 0.9, 0.5]);
        let before = ds.clone();
        let _ = ds.select_top_risk(5, &TopNBounds::default(), TableSort::default()).unwrap();
        assert_eq!(ds, before);
    }

    #[test]
    fn test_invalid_n() {
        let ds = dataset(&[0.1, 0.9]);
        let bounds = TopNBounds::default();

        for n in [-1i64, 0, 4, 51, 100] {
            match ds.select_top_risk(n, &bounds, TableSort::default()) {
                Err(AppError::InvalidN { n: got, min: 5, max: 50 }) => assert_eq!(got, n),
                other => panic!("expected InvalidN for {}, got {:?}", n, other),
            }
        }
    }

    fn with_tenure(id: &str, probability: f64, tenure: u32) -> ChurnReportRow {
        let mut r = row(id, probability);
        r.tenure = tenure;
        r
    }

    #[test]
    fn test_sort_reorders_selection_only() {
        let ds = ReportDataset::from_rows(vec![
            with_tenure("a", 0.9, 30),
            with_tenure("b", 0.1, 1),
            with_tenure("c", 0.8, 5),
            with_tenure("d", 0.7, 5),
            with_tenure("e", 0.6, 12),
            with_tenure("f", 0.5, 40),
        ])
        .unwrap();
        let sort = TableSort { column: SortColumn::Tenure, order: SortOrder::Asc };

        let top = ds.select_top_risk(5, &TopNBounds::default(), sort).unwrap();
        let ids: Vec<&str> = top.iter().map(|c| c.customer_id.as_str()).collect();
        // "b" has the lowest tenure but is not in the top five; c and d tie on tenure
        assert_eq!(ids, vec!["c", "d", "e", "a", "f"]);
    }

    #[test]
    fn test_sort_by_contract_uses_term_length() {
        let mut one = row("one", 0.9);
        one.contract = Contract::OneYear;
        let mut two = row("two", 0.8);
        two.contract = Contract::TwoYear;
        let monthly = row("monthly", 0.7);
        let ds = ReportDataset::from_rows(vec![two, one, monthly]).unwrap();

        let sort = TableSort { column: SortColumn::Contract, order: SortOrder::Desc };
        let top = ds.select_top_risk(5, &TopNBounds::default(), sort).unwrap();
        let ids: Vec<&str> = top.iter().map(|c| c.customer_id.as_str()).collect();
        assert_eq!(ids, vec!["two", "one", "monthly"]);
    }

    #[test]
    fn test_sort_params_parse() {
        assert_eq!("MonthlyCharges".parse::<SortColumn>(), Ok(SortColumn::MonthlyCharges));
        assert_eq!("customerID".parse::<SortColumn>(), Ok(SortColumn::CustomerId));
        assert!("monthlycharges".parse::<SortColumn>().is_err());
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert!("up".parse::<SortOrder>().is_err());
        assert_eq!(SortOrder::Asc.reversed(), SortOrder::Desc);
    }

    #[test]
    fn test_projection_fields() {
        let mut source = row("3668-QPYBK", 0.87354);
        source.tenure = 2;
        source.contract = Contract::OneYear;
        source.internet_service = InternetService::Dsl;
        source.monthly_charges = 53.85;

        let projected = HighRiskCustomer::from(&source);
        assert_eq!(projected.customer_id, "3668-QPYBK");
        assert_eq!(projected.churn_probability, "87.35%");
        assert_eq!(projected.tenure, 2);
        assert_eq!(projected.contract, Contract::OneYear);
        assert_eq!(projected.internet_service, InternetService::Dsl);
        assert_eq!(projected.monthly_charges, 53.85);
    }
}
