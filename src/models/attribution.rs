//! Feature attribution bundle and its summary

use serde::{Deserialize, Serialize};

/// Descriptor of the explainer that produced the attributions. Opaque to the
/// dashboard apart from display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainerInfo {
    pub kind: String,
    #[serde(default)]
    pub expected_value: Option<f64>,
}

/// Per-row attribution values plus the held-out feature matrix they explain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionBundle {
    pub explainer: ExplainerInfo,
    pub feature_names: Vec<String>,
    /// `values[row][feature]`
    pub values: Vec<Vec<f64>>,
    /// `data[row][feature]`
    pub data: Vec<Vec<f64>>,
}

/// Aggregate impact of one feature across all rows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImpact {
    pub name: String,
    /// Mean absolute attribution
    pub mean_abs: f64,
    /// Pearson correlation of feature value against attribution.
    /// Positive: high values push toward churn.
    pub direction: f64,
}

impl AttributionBundle {
    pub fn rows(&self) -> usize {
        self.values.len()
    }

    /// Check matrix shapes against the feature list and the expected row count
    pub fn check_alignment(&self, expected_rows: usize) -> Result<(), String> {
        let width = self.feature_names.len();
        if width == 0 {
            return Err("bundle has no features".to_string());
        }
        if self.values.len() != expected_rows {
            return Err(format!(
                "bundle has {} attribution rows, report has {}",
                self.values.len(),
                expected_rows
            ));
        }
        if self.data.len() != self.values.len() {
            return Err(format!(
                "bundle has {} attribution rows but {} feature rows",
                self.values.len(),
                self.data.len()
            ));
        }
        for (i, (values, data)) in self.values.iter().zip(&self.data).enumerate() {
            if values.len() != width || data.len() != width {
                return Err(format!("row {} does not have {} features", i, width));
            }
            if values.iter().chain(data).any(|v| !v.is_finite()) {
                return Err(format!("row {} contains a non-finite value", i));
            }
        }
        Ok(())
    }

    /// Rank features by mean absolute attribution and keep the top `max_display`.
    /// Ties keep feature order.
    pub fn feature_impacts(&self, max_display: usize) -> Vec<FeatureImpact> {
        let mut impacts: Vec<FeatureImpact> = self
            .feature_names
            .iter()
            .enumerate()
            .map(|(j, name)| {
                let attributions: Vec<f64> = self.values.iter().map(|row| row[j]).collect();
                let features: Vec<f64> = self.data.iter().map(|row| row[j]).collect();
                FeatureImpact {
                    name: name.clone(),
                    mean_abs: mean(attributions.iter().map(|v| v.abs())),
                    direction: pearson(&features, &attributions),
                }
            })
            .collect();

        impacts.sort_by(|a, b| b.mean_abs.total_cmp(&a.mean_abs));
        impacts.truncate(max_display);
        impacts
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

/// Pearson correlation; 0 when either side has no variance.
/// Variance is judged relative to the magnitude of the values, so small but
/// varying attributions still get a direction.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let mx = mean(xs.iter().copied());
    let my = mean(ys.iter().copied());

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    let mut sx = 0.0;
    let mut sy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
        sx += x * x;
        sy += y * y;
    }

    if vx <= f64::EPSILON * sx || vy <= f64::EPSILON * sy {
        return 0.0;
    }
    (cov / (vx.sqrt() * vy.sqrt())).clamp(-1.0, 1.0)
}


#[cfg(test)]
mod tests {
    use super::fixtures::bundle;

    #[test]
    fn test_alignment_ok() {
        assert!(bundle(4).check_alignment(4).is_ok());
    }

    #[test]
    fn test_alignment_row_count_mismatch() {
        let err = bundle(4).check_alignment(5).unwrap_err();
        assert!(err.contains("4 attribution rows, report has 5"));
    }

    #[test]
    fn test_alignment_ragged_row() {
        let mut b = bundle(3);
        b.data[1].pop();
        let err = b.check_alignment(3).unwrap_err();
        assert!(err.contains("row 1"));
    }

    #[test]
    fn test_alignment_non_finite() {
        let mut b = bundle(3);
        b.values[2][0] = f64::NAN;
        assert!(b.check_alignment(3).is_err());
    }

    #[test]
    fn test_feature_impacts_ranked_with_direction() {
        let impacts = bundle(5).feature_impacts(10);
        assert_eq!(impacts.len(), 2);
        assert_eq!(impacts[0].name, "MonthlyCharges");
        assert!(impacts[0].mean_abs > impacts[1].mean_abs);
        assert!((impacts[0].direction - 1.0).abs() < 1e-9);
        assert!((impacts[1].direction + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_feature_impacts_truncated() {
        let impacts = bundle(5).feature_impacts(1);
        assert_eq!(impacts.len(), 1);
        assert_eq!(impacts[0].name, "MonthlyCharges");
    }

    #[test]
    fn test_constant_feature_has_no_direction() {
        let mut b = bundle(4);
        for row in &mut b.data {
            row[0] = 1.0;
        }
        let impacts = b.feature_impacts(10);
        let tenure = impacts.iter().find(|f| f.name == "tenure").unwrap();
        assert_eq!(tenure.direction, 0.0);
    }

    #[test]
    fn test_repeated_fraction_has_no_direction() {
        let mut b = bundle(3);
        for row in &mut b.data {
            row[0] = 0.1;
        }
        let impacts = b.feature_impacts(10);
        let tenure = impacts.iter().find(|f| f.name == "tenure").unwrap();
        assert_eq!(tenure.direction, 0.0);
    }

    #[test]
    fn test_tiny_attributions_keep_direction() {
        let mut b = bundle(6);
        for (i, row) in b.values.iter_mut().enumerate() {
            row[0] = i as f64 * 1e-9;
        }
        let impacts = b.feature_impacts(10);
        let tenure = impacts.iter().find(|f| f.name == "tenure").unwrap();
        assert!((tenure.direction - 1.0).abs() < 1e-9);
    }
}
