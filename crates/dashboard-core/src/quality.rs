//! Data-quality gate for chart inputs.
//!
//! The upstream market-data service sometimes collapses a sector breakdown into
//! one synthetic bucket. A lone bucket with one of these names is a placeholder,
//! not a real single-sector concentration.

use crate::types::ChartSeries;

const PLACEHOLDER_BUCKETS: [&str; 2] = ["unknown", "us_equity"];

/// Whether a sector label set carries a real breakdown.
pub fn is_chart_data_usable<S: AsRef<str>>(labels: &[S]) -> bool {
    match labels {
        [] => false,
        [only] => {
            let label = only.as_ref().trim();
            !PLACEHOLDER_BUCKETS
                .iter()
                .any(|bucket| label.eq_ignore_ascii_case(bucket))
        }
        _ => true,
    }
}

/// Presence check used by the charts that have no denylist.
pub fn has_series_data(series: &ChartSeries) -> bool {
    !series.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_labels_unusable() {
        let labels: [&str; 0] = [];
        assert!(!is_chart_data_usable(&labels));
    }

    #[test]
    fn test_single_placeholder_bucket_unusable() {
        assert!(!is_chart_data_usable(&["Unknown"]));
        assert!(!is_chart_data_usable(&["US_EQUITY"]));
        assert!(!is_chart_data_usable(&[" unknown "]));
    }

    #[test]
    fn test_real_breakdowns_usable() {
        assert!(is_chart_data_usable(&["Tech", "Finance"]));
        assert!(is_chart_data_usable(&["Technology"]));
        // denylist only applies to the single-element case
        assert!(is_chart_data_usable(&["unknown", "tech"]));
    }

    #[test]
    fn test_series_presence() {
        assert!(!has_series_data(&ChartSeries::default()));
        let series = ChartSeries::from_parallel(vec!["AAPL".to_string()], vec![100.0]);
        assert!(has_series_data(&series));
    }
}
