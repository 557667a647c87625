//! Executive summary metrics

use serde::Serialize;

use super::customer::ReportDataset;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    pub total_customers: usize,
    /// Mean of `Actual_Churn`, in [0, 1]
    pub actual_churn_rate: f64,
    /// Number of rows with `Predicted_Churn` set
    pub predicted_churn_count: usize,
}

impl ReportDataset {
    /// Derive the three headline KPIs. An empty dataset has a churn rate of 0.
    pub fn summary(&self) -> SummaryMetrics {
        let total_customers = self.len();
        let churned = self.rows().iter().filter(|r| r.actual_churn).count();
        let predicted_churn_count = self.rows().iter().filter(|r| r.predicted_churn).count();

        let actual_churn_rate = if self.is_empty() {
            0.0
        } else {
            churned as f64 / total_customers as f64
        };

        SummaryMetrics {
            total_customers,
            actual_churn_rate,
            predicted_churn_count,
        }
    }
}
