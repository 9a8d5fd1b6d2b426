use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DashboardError;
use crate::format::{display_text, to_fixed, truthy_text};

/// The ten field-mapped sections of a value-analysis response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Methodology {
    Fundamentals,
    Graham,
    Buffett,
    Greenblatt,
    Munger,
    Lynch,
    Schloss,
    Davis,
    Templeton,
    Klarman,
}

impl Methodology {
    pub const ALL: [Methodology; 10] = [
        Methodology::Fundamentals,
        Methodology::Graham,
        Methodology::Buffett,
        Methodology::Greenblatt,
        Methodology::Munger,
        Methodology::Lynch,
        Methodology::Schloss,
        Methodology::Davis,
        Methodology::Templeton,
        Methodology::Klarman,
    ];

    /// JSON key of the section in the response body.
    pub fn key(&self) -> &'static str {
        match self {
            Methodology::Fundamentals => "fundamentals",
            Methodology::Graham => "graham",
            Methodology::Buffett => "buffett",
            Methodology::Greenblatt => "greenblatt",
            Methodology::Munger => "munger",
            Methodology::Lynch => "lynch",
            Methodology::Schloss => "schloss",
            Methodology::Davis => "davis",
            Methodology::Templeton => "templeton",
            Methodology::Klarman => "klarman",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Methodology::Fundamentals => "Fundamentaldaten",
            Methodology::Graham => "Graham",
            Methodology::Buffett => "Buffett",
            Methodology::Greenblatt => "Greenblatt",
            Methodology::Munger => "Munger",
            Methodology::Lynch => "Lynch",
            Methodology::Schloss => "Schloss",
            Methodology::Davis => "Davis",
            Methodology::Templeton => "Templeton",
            Methodology::Klarman => "Klarman",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// One report section: field name to raw JSON value. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MethodologySection {
    fields: Map<String, Value>,
}

impl MethodologySection {
    /// Absent and non-object values both become an empty section.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Object(map)) => Self {
                fields: map.clone(),
            },
            _ => Self::default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Aggregate value score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreSection {
    /// Fraction in [0, 1]; only set for genuine finite JSON numbers.
    pub score: Option<f64>,
    pub rating: Option<String>,
}

impl ScoreSection {
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };
        let score = match map.get("score") {
            Some(Value::Number(n)) => n.as_f64().filter(|s| s.is_finite()),
            _ => None,
        };
        let rating = truthy_text(map.get("rating"));
        Self { score, rating }
    }
}

/// Decoded value-analysis response. Every part is optional; decoding only
/// fails when the payload is not a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisReport {
    pub symbol: Option<String>,
    sections: [MethodologySection; 10],
    pub value: ScoreSection,
}

impl AnalysisReport {
    pub fn from_json(body: &Value) -> Result<Self, DashboardError> {
        let Value::Object(root) = body else {
            return Err(DashboardError::Decode(format!(
                "Unerwartete Antwort: JSON-Objekt erwartet, erhalten {}",
                json_kind(body)
            )));
        };

        let symbol = root
            .get("symbol")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let sections = std::array::from_fn(|i| {
            MethodologySection::from_value(root.get(Methodology::ALL[i].key()))
        });

        Ok(Self {
            symbol,
            sections,
            value: ScoreSection::from_value(root.get("value")),
        })
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, DashboardError> {
        let body: Value =
            serde_json::from_slice(bytes).map_err(|e| DashboardError::Decode(e.to_string()))?;
        Self::from_json(&body)
    }

    pub fn section(&self, methodology: Methodology) -> &MethodologySection {
        &self.sections[methodology.index()]
    }

    /// Top-level symbol, else the fundamentals symbol, else "".
    pub fn resolved_symbol(&self) -> String {
        match &self.symbol {
            Some(symbol) => symbol.clone(),
            None => display_text(self.section(Methodology::Fundamentals).get("symbol")),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

/// Ordered (label, value) pairs for one chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    points: Vec<SeriesPoint>,
}

impl ChartSeries {
    /// Zips parallel arrays. If either side is empty there is no usable data;
    /// surplus entries on the longer side are dropped.
    pub fn from_parallel(labels: Vec<String>, values: Vec<f64>) -> Self {
        let points = labels
            .into_iter()
            .zip(values)
            .map(|(label, value)| SeriesPoint { label, value })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Concentration risk in percent, always within [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RiskScore(f64);

impl RiskScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// NaN is coerced to 0 before clamping.
    pub fn new(raw: f64) -> Self {
        let raw = if raw.is_nan() { 0.0 } else { raw };
        Self(raw.clamp(Self::MIN, Self::MAX))
    }

    /// Lenient parse of an embedded attribute: the longest numeric prefix wins,
    /// anything unparseable is 0.
    pub fn parse(raw: &str) -> Self {
        Self::new(parse_float_prefix(raw).unwrap_or(0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// "42.0 %"
    pub fn display(&self) -> String {
        format!("{} %", to_fixed(self.0, 1))
    }
}

fn parse_float_prefix(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let candidate: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .collect();
    (1..=candidate.len())
        .rev()
        .find_map(|end| candidate[..end].parse::<f64>().ok())
}
