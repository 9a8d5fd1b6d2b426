use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use dashboard_core::{AnalysisReport, DashboardError, Methodology, Region, ReportSource};
use report_panels::{render_methodology, render_score};
use serde::Serialize;
use serde_json::Value;

use crate::failure::{classify_reply, user_message, LOAD_ERROR_PREFIX};

/// Render targets of the value-analysis view, bound once at startup.
#[derive(Clone)]
pub struct ValueAnalysisTargets {
    pub error: Arc<dyn Region>,
    pub loading: Arc<dyn Region>,
    pub content: Arc<dyn Region>,
    pub panels: BTreeMap<Methodology, Arc<dyn Region>>,
    pub score: Arc<dyn Region>,
    pub symbol_input: Option<Arc<dyn Region>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Loading { symbol: String },
    Content { symbol: String },
    ErrorShown { message: String },
}

/// Drives the value-analysis view: validation, one request per fetch, and the
/// Loading -> Content / ErrorShown transitions.
///
/// Fetches are not serialized or cancelled. Overlapping fetches each apply
/// their own result when they resolve, so the one resolving last decides what
/// is visible.
pub struct FetchOrchestrator {
    source: Arc<dyn ReportSource>,
    targets: ValueAnalysisTargets,
    state: Mutex<ViewState>,
}

impl FetchOrchestrator {
    pub fn new(source: Arc<dyn ReportSource>, targets: ValueAnalysisTargets) -> Self {
        Self {
            source,
            targets,
            state: Mutex::new(ViewState::Idle),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    /// Page-load entry: a non-blank pre-filled symbol starts exactly one fetch.
    pub async fn initialize(&self, initial_symbol: Option<&str>) -> Option<ViewState> {
        let symbol = initial_symbol.map(str::trim).filter(|s| !s.is_empty())?;
        if let Some(input) = &self.targets.symbol_input {
            input.set_text(symbol);
        }
        Some(self.fetch(symbol).await)
    }

    /// Form submission. A blank symbol only shows the validation message.
    pub async fn submit(&self, input: &str) -> Result<ViewState, DashboardError> {
        let symbol = input.trim();
        if symbol.is_empty() {
            let err = DashboardError::EmptySymbol;
            self.targets.error.set_text(&err.to_string());
            self.targets.error.show();
            return Err(err);
        }
        Ok(self.fetch(symbol).await)
    }

    /// One request-render cycle for an already validated symbol.
    pub async fn fetch(&self, symbol: &str) -> ViewState {
        self.enter_loading(symbol);
        tracing::info!("Loading value analysis for {}", symbol);

        let outcome = match self.source.fetch_report(symbol).await {
            Ok(reply) => classify_reply(reply).and_then(|body| self.render(&body)),
            Err(e) => Err(e),
        };

        let next = match outcome {
            Ok(symbol) => {
                self.targets.loading.hide();
                self.targets.content.show();
                tracing::info!("Value analysis for {} rendered", symbol);
                ViewState::Content { symbol }
            }
            Err(e) => {
                tracing::warn!("Value analysis for {} failed: {}", symbol, e);
                let message = user_message(LOAD_ERROR_PREFIX, &e);
                self.targets.loading.hide();
                self.targets.content.hide();
                self.targets.error.set_text(&message);
                self.targets.error.show();
                ViewState::ErrorShown { message }
            }
        };
        self.set_state(next.clone());
        next
    }

    fn enter_loading(&self, symbol: &str) {
        self.targets.error.set_text("");
        self.targets.error.hide();
        self.targets.loading.show();
        self.targets.content.hide();
        self.set_state(ViewState::Loading {
            symbol: symbol.to_string(),
        });
    }

    /// Decodes the body and replaces every panel. Returns the displayed symbol.
    fn render(&self, body: &Value) -> Result<String, DashboardError> {
        let report = AnalysisReport::from_json(body)?;

        for methodology in Methodology::ALL {
            match self.targets.panels.get(&methodology) {
                Some(region) => {
                    region.set_html(&render_methodology(&report, methodology).to_html())
                }
                None => tracing::debug!("No panel bound for {}", methodology.key()),
            }
        }
        self.targets.score.set_html(&render_score(&report.value).to_html());

        Ok(report.resolved_symbol())
    }

    fn set_state(&self, next: ViewState) {
        match self.state.lock() {
            Ok(mut state) => *state = next,
            Err(e) => *e.into_inner() = next,
        }
    }
}
