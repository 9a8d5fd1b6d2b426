use dashboard_core::format::escape_text;
use dashboard_core::MethodologySection;

use crate::field_spec::FieldSpec;

#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub label: &'static str,
    /// Display text, not yet escaped.
    pub value: String,
}

/// Rendered rows of one report panel, in field-table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelFragment {
    rows: Vec<PanelRow>,
}

impl PanelFragment {
    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<ul class=\"va-list\">\n");
        for row in &self.rows {
            html.push_str(&format!(
                "    <li><span>{}</span><strong>{}</strong></li>\n",
                escape_text(row.label),
                escape_text(&row.value)
            ));
        }
        html.push_str("</ul>");
        html
    }
}

/// Reads each table field from `section` (missing reads as absent), formats
/// it and emits one row per entry.
pub fn render_panel(section: &MethodologySection, spec: &[FieldSpec]) -> PanelFragment {
    let rows = spec
        .iter()
        .map(|entry| PanelRow {
            label: entry.label,
            value: entry.format.apply(section.get(entry.field)),
        })
        .collect();
    PanelFragment { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_spec::{field_spec, FieldFormat};
    use dashboard_core::Methodology;
    use serde_json::json;

    fn section(value: serde_json::Value) -> MethodologySection {
        MethodologySection::from_value(Some(&value))
    }

    #[test]
    fn test_rows_follow_spec_order() {
        let graham = section(json!({
            "is_undervalued": true,
            "margin_of_safety": 0.31,
            "intrinsic_value": 182.456
        }));
        let panel = render_panel(&graham, field_spec(Methodology::Graham));

        let rendered: Vec<(&str, &str)> = panel
            .rows()
            .iter()
            .map(|r| (r.label, r.value.as_str()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("Intrinsic Value:", "182.46"),
                ("Margin of Safety:", "31.0 %"),
                ("Unterbewertet:", "Ja"),
            ]
        );
    }

    #[test]
    fn test_missing_and_mistyped_fields_render_placeholder() {
        let lynch = section(json!({ "eps": null, "pe": "n/a", "peg": 1.25 }));
        let panel = render_panel(&lynch, field_spec(Methodology::Lynch));

        assert_eq!(panel.value_of("EPS:"), Some("-"));
        assert_eq!(panel.value_of("PE:"), Some("-"));
        assert_eq!(panel.value_of("PEG:"), Some("1.25"));
        assert_eq!(panel.value_of("Wachstums-Geschwindigkeit:"), Some("-"));
    }

    #[test]
    fn test_html_escapes_untrusted_text() {
        let fundamentals = section(json!({
            "sector": "<script>alert('x')</script>",
            "source": "Yahoo & Co"
        }));
        let spec = [
            FieldSpec {
                label: "Sektor:",
                format: FieldFormat::Text,
                field: "sector",
            },
            FieldSpec {
                label: "Quelle:",
                format: FieldFormat::Text,
                field: "source",
            },
        ];
        let html = render_panel(&fundamentals, &spec).to_html();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(html.contains("<strong>Yahoo &amp; Co</strong>"));
        assert!(html.starts_with("<ul class=\"va-list\">"));
    }

    #[test]
    fn test_empty_section_renders_every_row() {
        let panel = render_panel(&MethodologySection::default(), field_spec(Methodology::Klarman));
        assert_eq!(panel.rows().len(), 5);
        assert!(panel.rows().iter().all(|r| r.value == "-"));
    }
}
