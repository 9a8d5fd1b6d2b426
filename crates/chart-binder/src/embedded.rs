//! Chart data embedded in the page as percent-encoded JSON attributes.

use std::collections::HashMap;

use dashboard_core::{ChartSeries, RiskScore};
use serde::de::DeserializeOwned;

pub const POSITION_LABELS: &str = "position-labels";
pub const POSITION_VALUES: &str = "position-values";
pub const SECTOR_LABELS: &str = "sector-labels";
pub const SECTOR_VALUES: &str = "sector-values";
pub const PERFORMANCE_LABELS: &str = "performance-labels";
pub const PERFORMANCE_VALUES: &str = "performance-values";
pub const RISK_SCORE: &str = "risk-score";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedChartData {
    pub position_labels: Vec<String>,
    pub position_values: Vec<f64>,
    pub sector_labels: Vec<String>,
    pub sector_values: Vec<f64>,
    pub performance_labels: Vec<String>,
    pub performance_values: Vec<f64>,
    pub risk_score: RiskScore,
}

impl EmbeddedChartData {
    /// Malformed or missing attributes degrade to empty arrays (and a zero
    /// risk score); page initialization never fails on bad chart data.
    pub fn from_attributes<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let attributes: HashMap<String, String> = attributes
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let get = |key: &str| attributes.get(key).map(String::as_str);

        Self {
            position_labels: parse_array(POSITION_LABELS, get(POSITION_LABELS)),
            position_values: parse_array(POSITION_VALUES, get(POSITION_VALUES)),
            sector_labels: parse_array(SECTOR_LABELS, get(SECTOR_LABELS)),
            sector_values: parse_array(SECTOR_VALUES, get(SECTOR_VALUES)),
            performance_labels: parse_array(PERFORMANCE_LABELS, get(PERFORMANCE_LABELS)),
            performance_values: parse_array(PERFORMANCE_VALUES, get(PERFORMANCE_VALUES)),
            risk_score: get(RISK_SCORE)
                .and_then(decode)
                .map(|raw| RiskScore::parse(&raw))
                .unwrap_or_default(),
        }
    }

    pub fn positions(&self) -> ChartSeries {
        ChartSeries::from_parallel(self.position_labels.clone(), self.position_values.clone())
    }

    pub fn sectors(&self) -> ChartSeries {
        ChartSeries::from_parallel(self.sector_labels.clone(), self.sector_values.clone())
    }

    pub fn performance(&self) -> ChartSeries {
        ChartSeries::from_parallel(
            self.performance_labels.clone(),
            self.performance_values.clone(),
        )
    }
}

fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(raw).ok().map(|s| s.into_owned())
}

fn parse_array<T: DeserializeOwned>(key: &str, raw: Option<&str>) -> Vec<T> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let Some(decoded) = decode(raw) else {
        tracing::debug!("Chart attribute {} is not valid percent-encoded UTF-8", key);
        return Vec::new();
    };
    match serde_json::from_str::<Vec<T>>(&decoded) {
        Ok(values) => values,
        Err(e) => {
            tracing::debug!("Chart attribute {} is not a JSON array: {}", key, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_decodes_percent_encoded_arrays() {
        let data = EmbeddedChartData::from_attributes([
            (POSITION_LABELS, "%5B%22AAPL%22%2C%22NESN%22%5D"),
            (POSITION_VALUES, "%5B1200.5%2C800%5D"),
            (RISK_SCORE, "63.2"),
        ]);

        assert_eq!(data.position_labels, vec!["AAPL", "NESN"]);
        assert_eq!(data.position_values, vec![1200.5, 800.0]);
        assert_eq!(data.positions().len(), 2);
        assert_relative_eq!(data.risk_score.value(), 63.2);
    }

    #[test]
    fn test_plain_json_passes_through() {
        let data = EmbeddedChartData::from_attributes([
            (SECTOR_LABELS, r#"["Technology","Health Care"]"#),
            (SECTOR_VALUES, "[70, 30]"),
        ]);
        assert_eq!(data.sectors().labels(), vec!["Technology", "Health Care"]);
    }

    #[test]
    fn test_malformed_attributes_degrade_to_empty() {
        let data = EmbeddedChartData::from_attributes([
            (SECTOR_LABELS, "[\"Tech\","),
            (SECTOR_VALUES, "{\"a\":1}"),
            (PERFORMANCE_VALUES, "[1, \"x\"]"),
            (POSITION_LABELS, "%FF%FE"),
            (RISK_SCORE, "n/a"),
        ]);

        assert!(data.sector_labels.is_empty());
        assert!(data.sector_values.is_empty());
        assert!(data.performance_values.is_empty());
        assert!(data.position_labels.is_empty());
        assert_relative_eq!(data.risk_score.value(), 0.0);
    }

    #[test]
    fn test_missing_attributes() {
        let attributes: Vec<(String, String)> = Vec::new();
        let data = EmbeddedChartData::from_attributes(attributes);
        assert_eq!(data, EmbeddedChartData::default());
    }

    #[test]
    fn test_risk_score_is_clamped() {
        let data = EmbeddedChartData::from_attributes([(RISK_SCORE, "250")]);
        assert_relative_eq!(data.risk_score.value(), 100.0);
    }
}
