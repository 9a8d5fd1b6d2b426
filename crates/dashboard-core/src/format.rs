//! Display formatting for report fields.
//!
//! Every function here is total: absent, null or mistyped input renders as
//! [`PLACEHOLDER`] (or the empty string for text), never a panic.

use serde_json::Value;

pub const PLACEHOLDER: &str = "-";

/// Numeric view of a raw field. JSON numbers and numeric strings count,
/// booleans and containers do not.
pub fn as_finite(v: Option<&Value>) -> Option<f64> {
    let n = match v? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Fixed-point text with exact ties rounded away from zero (`0.125` -> `"0.13"`).
/// `{:.N}` alone would round ties to even.
pub fn to_fixed(n: f64, decimals: u32) -> String {
    let scale = 10f64.powi(decimals as i32);
    let scaled = n * scale;
    let rounded = if scaled.is_finite() {
        scaled.round() / scale
    } else {
        n
    };
    format!("{:.*}", decimals as usize, rounded)
}

/// Text of a truthy scalar field, `None` for absent, null, `false`, `0` and `""`.
pub fn truthy_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(display_text(Some(other))),
    }
}

pub fn format_number(v: Option<&Value>) -> String {
    match as_finite(v) {
        Some(n) => to_fixed(n, 2),
        None => PLACEHOLDER.to_string(),
    }
}

/// Fraction to percent: 0.12 -> "12.0 %".
pub fn format_percent(v: Option<&Value>) -> String {
    match as_finite(v) {
        Some(n) => percent_of_fraction(n),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn percent_of_fraction(fraction: f64) -> String {
    format!("{} %", to_fixed(fraction * 100.0, 1))
}

/// Market-cap style scaling. Below one million the value stays unitless.
pub fn format_billions(v: Option<&Value>) -> String {
    let Some(n) = as_finite(v) else {
        return PLACEHOLDER.to_string();
    };
    if n.abs() >= 1e9 {
        format!("{} Mrd.", to_fixed(n / 1e9, 1))
    } else if n.abs() >= 1e6 {
        format!("{} Mio.", to_fixed(n / 1e6, 1))
    } else {
        to_fixed(n, 0)
    }
}

pub fn format_boolean(v: Option<&Value>) -> String {
    match v {
        Some(Value::Bool(true)) => "Ja".to_string(),
        Some(Value::Bool(false)) => "Nein".to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Plain display text of a field before escaping.
pub fn display_text(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Escaped display text of a field. Missing and null render as "".
pub fn format_text(v: Option<&Value>) -> String {
    escape_text(&display_text(v))
}

/// Entity-escapes the five HTML-significant characters.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn all_formats(v: Option<&Value>) -> [String; 4] {
        [
            format_number(v),
            format_percent(v),
            format_billions(v),
            format_boolean(v),
        ]
    }

    #[test]
    fn test_placeholder_for_absent_and_non_finite() {
        let nan = json!("NaN");
        let inf = json!("inf");
        let null = Value::Null;
        for v in [None, Some(&null), Some(&nan), Some(&inf)] {
            for out in all_formats(v) {
                assert_eq!(out, PLACEHOLDER);
            }
        }
    }

    #[test]
    fn test_number_and_percent() {
        assert_eq!(format_number(Some(&json!(3.14159))), "3.14");
        assert_eq!(format_number(Some(&json!(-2))), "-2.00");
        assert_eq!(format_percent(Some(&json!(0.125))), "12.5 %");
        assert_eq!(format_percent(Some(&json!(0.12))), "12.0 %");
    }

    #[test]
    fn test_numeric_strings_are_numbers() {
        assert_eq!(format_number(Some(&json!(" 12 "))), "12.00");
        assert_eq!(format_number(Some(&json!("abc"))), PLACEHOLDER);
        assert_eq!(format_number(Some(&json!(true))), PLACEHOLDER);
        assert_eq!(format_percent(Some(&json!([0.1]))), PLACEHOLDER);
    }

    #[test]
    fn test_billions_scaling_and_boundaries() {
        assert_eq!(format_billions(Some(&json!(2_500_000_000u64))), "2.5 Mrd.");
        assert_eq!(format_billions(Some(&json!(1_000_000_000u64))), "1.0 Mrd.");
        assert_eq!(format_billions(Some(&json!(999_999_999u64))), "1000.0 Mio.");
        assert_eq!(format_billions(Some(&json!(1_000_000))), "1.0 Mio.");
        assert_eq!(format_billions(Some(&json!(750_000))), "750000");
        assert_eq!(format_billions(Some(&json!(999_999.5))), "1000000");
        assert_eq!(format_billions(Some(&json!(-3_200_000_000i64))), "-3.2 Mrd.");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(format_number(Some(&json!(0.125))), "0.13");
        assert_eq!(format_number(Some(&json!(-0.125))), "-0.13");
        assert_eq!(format_billions(Some(&json!(1_250_000))), "1.3 Mio.");
        assert_eq!(format_billions(Some(&json!(2_250_000_000u64))), "2.3 Mrd.");
        assert_eq!(format_billions(Some(&json!(2.5))), "3");
        assert_eq!(format_percent(Some(&json!(0.125))), "12.5 %");
        assert_eq!(to_fixed(0.25, 1), "0.3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        // 1.005 is stored just below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
    }

    #[test]
    fn test_truthy_text() {
        assert_eq!(truthy_text(Some(&json!("Attraktiv"))).as_deref(), Some("Attraktiv"));
        assert_eq!(truthy_text(Some(&json!(7))).as_deref(), Some("7"));
        assert_eq!(truthy_text(Some(&json!(true))).as_deref(), Some("true"));
        for falsy in [json!(null), json!(false), json!(0), json!("")] {
            assert_eq!(truthy_text(Some(&falsy)), None);
        }
        assert_eq!(truthy_text(None), None);
    }

    #[test]
    fn test_boolean_only_accepts_real_booleans() {
        assert_eq!(format_boolean(Some(&json!(true))), "Ja");
        assert_eq!(format_boolean(Some(&json!(false))), "Nein");
        assert_eq!(format_boolean(Some(&json!("true"))), PLACEHOLDER);
        assert_eq!(format_boolean(Some(&json!(1))), PLACEHOLDER);
    }

    #[test]
    fn test_escape_removes_raw_markup() {
        let escaped = escape_text("<b>&'\"");
        assert_eq!(escaped, "&lt;b&gt;&amp;&#039;&quot;");
        for c in ['<', '>', '"', '\''] {
            assert!(!escaped.contains(c));
        }
        // every remaining '&' starts an entity
        assert_eq!(escaped.matches('&').count(), escaped.matches(';').count());
    }

    #[test]
    fn test_text_fields() {
        assert_eq!(format_text(None), "");
        assert_eq!(format_text(Some(&Value::Null)), "");
        assert_eq!(format_text(Some(&json!("R&D"))), "R&amp;D");
        assert_eq!(format_text(Some(&json!(42))), "42");
    }
}
