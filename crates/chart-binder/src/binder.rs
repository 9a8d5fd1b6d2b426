use std::sync::Arc;

use dashboard_core::{has_series_data, is_chart_data_usable, ChartSeries, Region, RiskScore};

use crate::config::{ChartConfig, ChartKind, ChartSpec, GaugeConfig};
use crate::embedded::EmbeddedChartData;
use crate::{ChartError, ChartTarget};

pub const SECTOR_ADVISORY_TEXT: &str = "Für dieses Portfolio liegen keine aussagekräftigen \
Sektordaten vor. Der Datenanbieter liefert nur eine Sammelkategorie.";

/// Chart surfaces and their companion text regions. Any of them may be absent
/// on a given page.
#[derive(Clone, Default)]
pub struct ChartTargets {
    pub positions_pie: Option<Arc<dyn ChartTarget>>,
    pub sector_bar: Option<Arc<dyn ChartTarget>>,
    pub sector_advisory: Option<Arc<dyn Region>>,
    pub performance_line: Option<Arc<dyn ChartTarget>>,
    pub risk_gauge: Option<Arc<dyn ChartTarget>>,
    pub risk_value: Option<Arc<dyn Region>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum BindingOutcome {
    Drawn,
    /// Empty series; nothing was touched.
    NoData,
    /// Data failed the quality gate; the advisory is shown instead.
    Suppressed,
    /// No target on the page or no charting library.
    #[default]
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingReport {
    pub pie: BindingOutcome,
    pub bar: BindingOutcome,
    pub line: BindingOutcome,
    pub gauge: BindingOutcome,
}

/// Binds all four charts. Order does not matter and no binding depends on another.
pub fn bind_charts(data: &EmbeddedChartData, targets: &ChartTargets) -> BindingReport {
    let report = BindingReport {
        pie: bind_series_chart(ChartKind::Pie, targets.positions_pie.as_deref(), &data.positions()),
        bar: bind_sector_chart(
            targets.sector_bar.as_deref(),
            targets.sector_advisory.as_deref(),
            &data.sector_labels,
            &data.sectors(),
        ),
        line: bind_series_chart(
            ChartKind::Line,
            targets.performance_line.as_deref(),
            &data.performance(),
        ),
        gauge: bind_risk_gauge(
            targets.risk_gauge.as_deref(),
            targets.risk_value.as_deref(),
            data.risk_score,
        ),
    };
    tracing::debug!("Chart bindings: {:?}", report);
    report
}

/// Draws a pie, bar or line chart when there is data for it.
pub fn bind_series_chart(
    kind: ChartKind,
    target: Option<&dyn ChartTarget>,
    series: &ChartSeries,
) -> BindingOutcome {
    let Some(target) = target else {
        tracing::debug!("No target for {:?} chart, skipping", kind);
        return BindingOutcome::Skipped;
    };
    if !has_series_data(series) {
        return BindingOutcome::NoData;
    }
    draw(kind, target, &ChartSpec::Series(ChartConfig::new(kind, series)))
}

/// Sector bar chart behind the data-quality gate. The advisory region is shown
/// when the gate rejects the labels and hidden once a chart is drawn.
pub fn bind_sector_chart(
    target: Option<&dyn ChartTarget>,
    advisory: Option<&dyn Region>,
    labels: &[String],
    series: &ChartSeries,
) -> BindingOutcome {
    let Some(target) = target else {
        tracing::debug!("No target for sector chart, skipping");
        return BindingOutcome::Skipped;
    };
    if !is_chart_data_usable(labels) {
        tracing::info!("Sector data is a placeholder bucket, showing advisory instead of chart");
        if let Some(advisory) = advisory {
            advisory.set_text(SECTOR_ADVISORY_TEXT);
            advisory.show();
        }
        return BindingOutcome::Suppressed;
    }

    let outcome = bind_series_chart(ChartKind::Bar, Some(target), series);
    if outcome == BindingOutcome::Drawn {
        if let Some(advisory) = advisory {
            advisory.hide();
        }
    }
    outcome
}

/// Radial risk gauge plus the numeric readout next to it.
pub fn bind_risk_gauge(
    target: Option<&dyn ChartTarget>,
    readout: Option<&dyn Region>,
    score: RiskScore,
) -> BindingOutcome {
    let Some(target) = target else {
        tracing::debug!("No target for risk gauge, skipping");
        return BindingOutcome::Skipped;
    };
    let outcome = draw("gauge", target, &ChartSpec::Gauge(GaugeConfig::new(score)));
    if outcome == BindingOutcome::Drawn {
        if let Some(readout) = readout {
            readout.set_text(&score.display());
        }
    }
    outcome
}

fn draw(name: impl std::fmt::Debug, target: &dyn ChartTarget, spec: &ChartSpec) -> BindingOutcome {
    match target.draw(spec) {
        Ok(()) => BindingOutcome::Drawn,
        Err(ChartError::Unavailable) => {
            tracing::debug!("Charting library unavailable for {:?}, skipping", name);
            BindingOutcome::Skipped
        }
        Err(e) => {
            tracing::warn!("Failed to draw {:?} chart: {}", name, e);
            BindingOutcome::Failed(e.to_string())
        }
    }
}
