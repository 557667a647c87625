//! Churn rate per categorical driver

use std::fmt::Display;

use serde::Serialize;

use super::customer::{ChurnReportRow, Contract, InternetService, ReportDataset};

/// One bar of a driver chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRate {
    pub category: String,
    pub customers: usize,
    pub churned: usize,
    /// Mean of `Actual_Churn` within the group, in [0, 1]
    pub churn_rate: f64,
}

impl ReportDataset {
    /// Group rows by `key` and compute the actual churn rate of each group.
    ///
    /// With `order`, listed categories come first in that order; categories
    /// absent from the data are skipped and unlisted ones follow in
    /// first-appearance order. Without `order`, groups appear in
    /// first-appearance order.
    pub fn churn_rate_by<C, F>(&self, key: F, order: Option<&[C]>) -> Vec<CategoryRate>
    where
        C: Copy + PartialEq + Display,
        F: Fn(&ChurnReportRow) -> C,
    {
        // (category, customers, churned) in first-appearance order
        let mut groups: Vec<(C, usize, usize)> = Vec::new();
        for row in self.rows() {
            let category = key(row);
            let churned = usize::from(row.actual_churn);
            match groups.iter_mut().find(|(c, _, _)| *c == category) {
                Some(group) => {
                    group.1 += 1;
                    group.2 += churned;
                }
                None => groups.push((category, 1, churned)),
            }
        }

        if let Some(order) = order {
            let rank = |c: &C| order.iter().position(|o| o == c).unwrap_or(order.len());
            // stable: unlisted categories keep their appearance order
            groups.sort_by_key(|(c, _, _)| rank(c));
        }

        groups
            .into_iter()
            .map(|(category, customers, churned)| CategoryRate {
                category: category.to_string(),
                customers,
                churned,
                churn_rate: churned as f64 / customers as f64,
            })
            .collect()
    }

    /// Churn rate by contract term, in contract-length order
    pub fn churn_rate_by_contract(&self) -> Vec<CategoryRate> {
        self.churn_rate_by(|r| r.contract, Some(&Contract::ORDER[..]))
    }

    /// Churn rate by internet service, in first-appearance order
    pub fn churn_rate_by_internet_service(&self) -> Vec<CategoryRate> {
        self.churn_rate_by::<InternetService, _>(|r| r.internet_service, None)
    }
}
