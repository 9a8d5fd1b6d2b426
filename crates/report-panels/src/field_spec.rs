use dashboard_core::format::{
    display_text, format_billions, format_boolean, format_number, format_percent,
};
use dashboard_core::Methodology;
use serde_json::Value;

/// How a raw field is turned into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Number,
    Percent,
    Billions,
    Boolean,
    Text,
}

impl FieldFormat {
    /// Unescaped display string; escaping happens when the row is emitted.
    pub fn apply(&self, value: Option<&Value>) -> String {
        match self {
            FieldFormat::Number => format_number(value),
            FieldFormat::Percent => format_percent(value),
            FieldFormat::Billions => format_billions(value),
            FieldFormat::Boolean => format_boolean(value),
            FieldFormat::Text => display_text(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub format: FieldFormat,
    pub field: &'static str,
}

const fn field(label: &'static str, format: FieldFormat, field: &'static str) -> FieldSpec {
    FieldSpec {
        label,
        format,
        field,
    }
}

use FieldFormat::{Billions, Boolean, Number, Percent, Text};

const FUNDAMENTALS: &[FieldSpec] = &[
    field("Symbol:", Text, "symbol"),
    field("Preis:", Number, "price"),
    field("EPS:", Number, "eps"),
    field("Buchwert je Aktie:", Number, "book_value"),
    field("ROE:", Percent, "roe"),
    field("Dividendenrendite:", Percent, "dividend_yield"),
    field("Debt/Equity:", Number, "debt_to_equity"),
    field("EPS-Wachstum (5Y):", Percent, "earnings_growth_5y"),
    field("Marktkapitalisierung:", Billions, "market_cap"),
    field("Sektor:", Text, "sector"),
    field("Industrie:", Text, "industry"),
    field("Quelle:", Text, "source"),
];

const GRAHAM: &[FieldSpec] = &[
    field("Intrinsic Value:", Number, "intrinsic_value"),
    field("Margin of Safety:", Percent, "margin_of_safety"),
    field("Unterbewertet:", Boolean, "is_undervalued"),
];

// Buffett and Munger share the quality checklist.
const QUALITY: &[FieldSpec] = &[
    field("ROE:", Percent, "roe"),
    field("Debt/Equity:", Number, "debt_to_equity"),
    field("EPS-Wachstum (5Y):", Percent, "earnings_growth_5y"),
    field("Quality Score:", Percent, "quality_score"),
    field("Hohe Qualität:", Boolean, "is_high_quality"),
];

const GREENBLATT: &[FieldSpec] = &[
    field("Earnings Yield:", Percent, "earnings_yield"),
    field("Return on Capital:", Percent, "return_on_capital"),
    field("Magic Score:", Percent, "magic_score"),
];

const LYNCH: &[FieldSpec] = &[
    field("EPS:", Number, "eps"),
    field("Wachstums-Geschwindigkeit:", Percent, "growth_pct"),
    field("PE:", Number, "pe"),
    field("PEG:", Number, "peg"),
    field("Score:", Percent, "score"),
];

// Schloss and Davis are both price/book deep-value screens.
const DEEP_VALUE: &[FieldSpec] = &[
    field("Preis:", Number, "price"),
    field("Buchwert je Aktie:", Number, "book_value"),
    field("Price/Book:", Number, "price_to_book"),
    field("Debt/Equity:", Number, "debt_to_equity"),
    field("Score:", Percent, "score"),
];

const TEMPLETON: &[FieldSpec] = &[
    field("Preis:", Number, "price"),
    field("EPS:", Number, "eps"),
    field("PE:", Number, "pe"),
    field("Price/Book:", Number, "price_to_book"),
    field("Rel. PE vs Markt (15x):", Number, "relative_pe_vs_market15"),
    field("Score:", Percent, "score"),
];

const KLARMAN: &[FieldSpec] = &[
    field("Intrinsic Value:", Number, "intrinsic_value"),
    field("Preis:", Number, "price"),
    field("Margin of Safety:", Percent, "margin_of_safety"),
    field("Debt/Equity:", Number, "debt_to_equity"),
    field("Score:", Percent, "score"),
];

/// Ordered field table of a methodology panel.
pub fn field_spec(methodology: Methodology) -> &'static [FieldSpec] {
    match methodology {
        Methodology::Fundamentals => FUNDAMENTALS,
        Methodology::Graham => GRAHAM,
        Methodology::Buffett | Methodology::Munger => QUALITY,
        Methodology::Greenblatt => GREENBLATT,
        Methodology::Lynch => LYNCH,
        Methodology::Schloss | Methodology::Davis => DEEP_VALUE,
        Methodology::Templeton => TEMPLETON,
        Methodology::Klarman => KLARMAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_sizes() {
        let sizes: Vec<usize> = Methodology::ALL
            .iter()
            .map(|m| field_spec(*m).len())
            .collect();
        assert_eq!(sizes, vec![12, 3, 5, 3, 5, 5, 5, 5, 6, 5]);
    }

    #[test]
    fn test_fields_are_unique_within_a_table() {
        for methodology in Methodology::ALL {
            let spec = field_spec(methodology);
            for (i, a) in spec.iter().enumerate() {
                assert!(
                    spec[i + 1..].iter().all(|b| b.field != a.field),
                    "{} repeats {}",
                    methodology.key(),
                    a.field
                );
            }
        }
    }

    #[test]
    fn test_format_dispatch() {
        assert_eq!(Percent.apply(Some(&json!(0.2))), "20.0 %");
        assert_eq!(Billions.apply(Some(&json!(3e12))), "3000.0 Mrd.");
        assert_eq!(Boolean.apply(None), "-");
        assert_eq!(Text.apply(Some(&json!("<Tech>"))), "<Tech>");
        assert_eq!(Number.apply(Some(&json!("x"))), "-");
    }
}
