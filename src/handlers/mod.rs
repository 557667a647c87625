//! HTTP handlers

pub mod health;
pub mod pages;
pub mod reports;

use serde::Deserialize;

use crate::config::TopNBounds;
use crate::models::TableSort;
use crate::{AppError, AppResult};

/// Contact list controls. Kept as raw strings so a malformed value is
/// answered with the JSON error body instead of a query rejection.
#[derive(Debug, Deserialize, Default)]
pub struct TableQuery {
    pub top_n: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

impl TableQuery {
    pub fn top_n(&self, bounds: &TopNBounds) -> AppResult<i64> {
        match self.top_n.as_deref() {
            None => Ok(i64::from(bounds.default)),
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::ValidationError(format!("top_n must be an integer, got '{}'", raw))
            }),
        }
    }

    pub fn sort(&self) -> AppResult<TableSort> {
        let mut sort = TableSort::default();
        if let Some(column) = self.sort.as_deref() {
            sort.column = column.parse().map_err(AppError::ValidationError)?;
            sort.order = sort.column.first_order();
        }
        if let Some(order) = self.order.as_deref() {
            sort.order = order.parse().map_err(AppError::ValidationError)?;
        }
        Ok(sort)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SortColumn, SortOrder};

    fn query(top_n: Option<&str>, sort: Option<&str>, order: Option<&str>) -> TableQuery {
        TableQuery {
            top_n: top_n.map(String::from),
            sort: sort.map(String::from),
            order: order.map(String::from),
        }
    }

    #[test]
    fn test_top_n_defaults_and_parses() {
        let bounds = TopNBounds::default();
        assert_eq!(query(None, None, None).top_n(&bounds).unwrap(), 10);
        assert_eq!(query(Some(" 25 "), None, None).top_n(&bounds).unwrap(), 25);
        // range is checked by the selector, not here
        assert_eq!(query(Some("-3"), None, None).top_n(&bounds).unwrap(), -3);
    }

    #[test]
    fn test_top_n_not_an_integer() {
        let bounds = TopNBounds::default();
        for raw in ["abc", "", "7.5", "99999999999999999999"] {
            match query(Some(raw), None, None).top_n(&bounds) {
                Err(AppError::ValidationError(msg)) => assert!(msg.contains("integer"), "{}", msg),
                other => panic!("expected ValidationError for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_sort_defaults() {
        assert_eq!(query(None, None, None).sort().unwrap(), TableSort::default());

        let sort = query(None, Some("Contract"), None).sort().unwrap();
        assert_eq!(sort, TableSort { column: SortColumn::Contract, order: SortOrder::Asc });

        let sort = query(None, Some("tenure"), Some("asc")).sort().unwrap();
        assert_eq!(sort, TableSort { column: SortColumn::Tenure, order: SortOrder::Asc });
    }

    #[test]
    fn test_sort_rejects_unknown_values() {
        assert!(matches!(
            query(None, Some("gender"), None).sort(),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            query(None, None, Some("sideways")).sort(),
            Err(AppError::ValidationError(_))
        ));
    }
}
