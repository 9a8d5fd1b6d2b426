//! Chart widgets of the portfolio dashboard.
//!
//! Chart libraries are opaque: a [`ChartTarget`] receives a serializable
//! [`ChartSpec`] and draws it. Each chart is bound independently, so a missing
//! target or library never blocks the others.

pub mod binder;
pub mod config;
pub mod embedded;
pub mod recording;

pub use binder::{
    bind_charts, bind_risk_gauge, bind_sector_chart, bind_series_chart, BindingOutcome,
    BindingReport, ChartTargets, SECTOR_ADVISORY_TEXT,
};
pub use config::{ChartConfig, ChartKind, ChartSpec, GaugeConfig};
pub use embedded::EmbeddedChartData;
pub use recording::RecordingChart;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    /// The charting library is not loaded on this page.
    #[error("Charting library unavailable")]
    Unavailable,

    #[error("Chart rendering failed: {0}")]
    Render(String),
}

/// A drawing surface backed by some charting library.
pub trait ChartTarget: Send + Sync {
    fn draw(&self, spec: &ChartSpec) -> Result<(), ChartError>;
}
