//! Value-analysis report panels.
//!
//! Every methodology panel is the same label/value list driven by a field
//! table; the aggregate score has its own small fragment.

pub mod field_spec;
pub mod panel;
pub mod score;

pub use field_spec::{field_spec, FieldFormat, FieldSpec};
pub use panel::{render_panel, PanelFragment, PanelRow};
pub use score::{render_score, ScoreFragment, SCORE_NOTE};

use dashboard_core::{AnalysisReport, Methodology};
use serde_json::Value;

/// Renders one section of `report`. The fundamentals panel shows the resolved
/// report symbol rather than the raw nested field.
pub fn render_methodology(report: &AnalysisReport, methodology: Methodology) -> PanelFragment {
    let spec = field_spec(methodology);
    if methodology == Methodology::Fundamentals {
        let mut section = report.section(methodology).clone();
        section.insert("symbol", Value::String(report.resolved_symbol()));
        render_panel(&section, spec)
    } else {
        render_panel(report.section(methodology), spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fundamentals_use_resolved_symbol() {
        let report = AnalysisReport::from_json(&json!({
            "symbol": "NESN",
            "fundamentals": { "symbol": "ignored", "price": 101.5 }
        }))
        .unwrap();

        let panel = render_methodology(&report, Methodology::Fundamentals);
        assert_eq!(panel.value_of("Symbol:"), Some("NESN"));
        assert_eq!(panel.value_of("Preis:"), Some("101.50"));
    }

    #[test]
    fn test_every_methodology_renders_on_empty_report() {
        let report = AnalysisReport::from_json(&json!({})).unwrap();
        for methodology in Methodology::ALL {
            let panel = render_methodology(&report, methodology);
            assert_eq!(panel.rows().len(), field_spec(methodology).len());
        }
    }
}
