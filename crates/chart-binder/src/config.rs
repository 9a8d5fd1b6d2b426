//! Serializable chart configurations. Field names follow the option objects
//! of the page's charting libraries so a target can hand them over verbatim.

use dashboard_core::{ChartSeries, RiskScore};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartSpec {
    Series(ChartConfig),
    Gauge(GaugeConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    pub ticks: Ticks,
}

/// Tick labels are `value + suffix`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticks {
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl ChartConfig {
    pub fn new(kind: ChartKind, series: &ChartSeries) -> Self {
        match kind {
            ChartKind::Pie => Self::pie(series),
            ChartKind::Bar => Self::bar(series),
            ChartKind::Line => Self::line(series),
        }
    }

    /// Portfolio weight per position, legend below the chart.
    pub fn pie(series: &ChartSeries) -> Self {
        Self {
            kind: ChartKind::Pie,
            data: ChartData::single(series, None, None),
            options: ChartOptions {
                scales: None,
                plugins: Plugins {
                    legend: Legend {
                        display: true,
                        position: Some("bottom".to_string()),
                    },
                },
            },
        }
    }

    /// Sector allocation in percent.
    pub fn bar(series: &ChartSeries) -> Self {
        Self {
            kind: ChartKind::Bar,
            data: ChartData::single(series, None, None),
            options: ChartOptions {
                scales: Some(Scales {
                    y: Axis {
                        begin_at_zero: true,
                        ticks: Ticks {
                            suffix: " %".to_string(),
                        },
                    },
                }),
                plugins: Plugins::hidden_legend(),
            },
        }
    }

    pub fn line(series: &ChartSeries) -> Self {
        Self {
            kind: ChartKind::Line,
            data: ChartData::single(series, Some(0.35), Some(false)),
            options: ChartOptions {
                scales: None,
                plugins: Plugins::hidden_legend(),
            },
        }
    }
}

impl ChartData {
    fn single(series: &ChartSeries, tension: Option<f64>, fill: Option<bool>) -> Self {
        Self {
            labels: series.labels(),
            datasets: vec![Dataset {
                data: series.values(),
                tension,
                fill,
            }],
        }
    }
}

impl Plugins {
    fn hidden_legend() -> Self {
        Self {
            legend: Legend {
                display: false,
                position: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugeConfig {
    pub chart: GaugeChart,
    pub series: Vec<f64>,
    pub labels: Vec<String>,
    pub plot_options: GaugePlotOptions,
    pub fill: GaugeFill,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeChart {
    #[serde(rename = "type")]
    pub kind: String,
    pub height: u32,
    pub toolbar: Show,
    pub sparkline: Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Show {
    pub show: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Enabled {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GaugePlotOptions {
    pub radial_bar: RadialBar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialBar {
    pub start_angle: i32,
    pub end_angle: i32,
    pub hollow: Hollow,
    pub track: Track,
    pub data_labels: RadialDataLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hollow {
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub background: String,
    pub stroke_width: String,
}

/// The readout lives next to the gauge, so the built-in labels stay hidden.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadialDataLabels {
    pub name: Show,
    pub value: Show,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeFill {
    #[serde(rename = "type")]
    pub kind: String,
    pub gradient: Gradient,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub shade: String,
    #[serde(rename = "type")]
    pub direction: String,
    pub stops: Vec<u32>,
    pub color_stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorStop {
    pub offset: u32,
    pub color: String,
    pub opacity: f64,
}

pub const GAUGE_LABEL: &str = "Konzentrationsgrad";

/// Green at no concentration, yellow halfway, red at full concentration.
pub const GAUGE_COLOR_STOPS: [(u32, &str); 3] =
    [(0, "#22c55e"), (50, "#facc15"), (100, "#ef4444")];

impl GaugeConfig {
    pub fn new(score: RiskScore) -> Self {
        let hidden = Show { show: false };
        Self {
            chart: GaugeChart {
                kind: "radialBar".to_string(),
                height: 260,
                toolbar: hidden,
                sparkline: Enabled { enabled: true },
            },
            series: vec![score.value()],
            labels: vec![GAUGE_LABEL.to_string()],
            plot_options: GaugePlotOptions {
                radial_bar: RadialBar {
                    start_angle: -110,
                    end_angle: 110,
                    hollow: Hollow {
                        size: "60%".to_string(),
                    },
                    track: Track {
                        background: "#e5e7eb".to_string(),
                        stroke_width: "100%".to_string(),
                    },
                    data_labels: RadialDataLabels {
                        name: hidden,
                        value: hidden,
                    },
                },
            },
            fill: GaugeFill {
                kind: "gradient".to_string(),
                gradient: Gradient {
                    shade: "light".to_string(),
                    direction: "horizontal".to_string(),
                    stops: GAUGE_COLOR_STOPS.iter().map(|(offset, _)| *offset).collect(),
                    color_stops: GAUGE_COLOR_STOPS
                        .iter()
                        .map(|(offset, color)| ColorStop {
                            offset: *offset,
                            color: color.to_string(),
                            opacity: 1.0,
                        })
                        .collect(),
                },
            },
        }
    }
}
