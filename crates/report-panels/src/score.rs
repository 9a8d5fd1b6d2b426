use dashboard_core::format::{escape_text, percent_of_fraction, PLACEHOLDER};
use dashboard_core::ScoreSection;

pub const SCORE_NOTE: &str = "Der Value-Score kombiniert Margin-of-Safety, Qualitätskennzahlen \
und Ertragskraft zu einem Gesamtbild.";

/// The aggregate score panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreFragment {
    /// "42.0 %" or the placeholder.
    pub value: String,
    pub rating: String,
}

impl ScoreFragment {
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"va-score-main\">\n    \
             <div class=\"va-score-value\">{}</div>\n    \
             <div class=\"va-score-level\">{}</div>\n\
             </div>\n\
             <p class=\"va-score-note\">{}</p>",
            escape_text(&self.value),
            escape_text(&self.rating),
            escape_text(SCORE_NOTE)
        )
    }
}

pub fn render_score(score: &ScoreSection) -> ScoreFragment {
    ScoreFragment {
        value: score
            .score
            .map(percent_of_fraction)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        rating: score.rating.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_and_rating() {
        let fragment = render_score(&ScoreSection {
            score: Some(0.734),
            rating: Some("Attraktiv".to_string()),
        });
        assert_eq!(fragment.value, "73.4 %");
        assert_eq!(fragment.rating, "Attraktiv");

        let html = fragment.to_html();
        assert!(html.contains("<div class=\"va-score-value\">73.4 %</div>"));
        assert!(html.contains("<div class=\"va-score-level\">Attraktiv</div>"));
    }

    #[test]
    fn test_missing_score() {
        let fragment = render_score(&ScoreSection::default());
        assert_eq!(fragment.value, "-");
        assert_eq!(fragment.rating, "");
    }

    #[test]
    fn test_rating_is_escaped() {
        let html = render_score(&ScoreSection {
            score: None,
            rating: Some("<b>Top</b>".to_string()),
        })
        .to_html();
        assert!(html.contains("&lt;b&gt;Top&lt;/b&gt;"));
    }
}
