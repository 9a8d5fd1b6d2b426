//! Failure-to-message policy shared by the value-analysis view and the chat widget.

use dashboard_core::{DashboardError, HttpReply};
use serde_json::Value;

pub const LOAD_ERROR_PREFIX: &str = "Fehler beim Laden der Value-Analyse: ";

/// Splits a reply into its success body or a status error carrying the
/// server's `error` text (falling back to `HTTP <status>`).
pub fn classify_reply(reply: HttpReply) -> Result<Value, DashboardError> {
    if reply.is_success() {
        Ok(reply.body)
    } else {
        Err(DashboardError::status(reply.status, reply.error_message().as_deref()))
    }
}

/// User-facing text for a failure, behind a fixed localized prefix.
pub fn user_message(prefix: &str, err: &DashboardError) -> String {
    format!("{}{}", prefix, err)
}
