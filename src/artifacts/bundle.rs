//! Attribution bundle parsing

use crate::models::AttributionBundle;

/// Decode the JSON bundle and check it lines up with `expected_rows` report rows
pub fn parse_bundle(bytes: &[u8], expected_rows: usize) -> Result<AttributionBundle, String> {
    let bundle: AttributionBundle =
        serde_json::from_slice(bytes).map_err(|e| format!("invalid bundle: {}", e))?;
    bundle.check_alignment(expected_rows)?;
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bundle() {
        let json = br#"{
            "explainer": {"kind": "TreeExplainer", "expected_value": -1.1},
            "feature_names": ["tenure", "MonthlyCharges"],
            "values": [[-0.4, 0.2], [0.3, 0.1]],
            "data": [[1, 29.85], [45, 42.3]]
        }"#;
        let bundle = parse_bundle(json, 2).unwrap();
        assert_eq!(bundle.rows(), 2);
        assert_eq!(bundle.explainer.kind, "TreeExplainer");
        assert_eq!(bundle.data[1][0], 45.0);
    }

    #[test]
    fn test_expected_value_optional() {
        let json = br#"{"explainer": {"kind": "Linear"}, "feature_names": ["a"], "values": [[0.1]], "data": [[1.0]]}"#;
        let bundle = parse_bundle(json, 1).unwrap();
        assert_eq!(bundle.explainer.expected_value, None);
    }

    #[test]
    fn test_rejects_garbage_and_misalignment() {
        assert!(parse_bundle(b"\x80\x04pickle", 1).unwrap_err().starts_with("invalid bundle"));

        let json = br#"{"explainer": {"kind": "Linear"}, "feature_names": ["a"], "values": [[0.1]], "data": [[1.0]]}"#;
        assert!(parse_bundle(json, 3).is_err());
    }
}
