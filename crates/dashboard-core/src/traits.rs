use async_trait::async_trait;
use serde_json::Value;

use crate::error::DashboardError;
use crate::format::truthy_text;

/// A render target the dashboard writes into (an element on the page, or an
/// in-memory stand-in).
pub trait Region: Send + Sync {
    fn set_visible(&self, visible: bool);
    fn set_text(&self, text: &str);
    fn set_html(&self, html: &str);

    fn show(&self) {
        self.set_visible(true);
    }

    fn hide(&self) {
        self.set_visible(false);
    }
}

/// A JSON reply with its HTTP status. The body is decoded whatever the status,
/// since failure replies carry an `error` field.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Value,
}

impl HttpReply {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` field of a failure body as text, if it is set. Non-string
    /// values are stringified.
    pub fn error_message(&self) -> Option<String> {
        truthy_text(self.body.get("error"))
    }
}

/// Network side of the value-analysis view.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch the analysis for an already trimmed, non-empty symbol.
    /// Transport and JSON decode failures are errors; HTTP failure statuses are not.
    async fn fetch_report(&self, symbol: &str) -> Result<HttpReply, DashboardError>;
}

/// Network side of the assistant chat widget.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send_message(&self, message: &str) -> Result<HttpReply, DashboardError>;
}
