use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Bitte ein Ticker-Symbol eingeben.")]
    EmptySymbol,

    #[error("{0}")]
    Transport(String),

    /// Non-success HTTP status. `message` is the server's `error` field when the
    /// body carried one, otherwise `HTTP <status>`.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Decode(String),
}

impl DashboardError {
    pub fn status(status: u16, server_message: Option<&str>) -> Self {
        let message = server_message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));
        DashboardError::Status { status, message }
    }

    /// Validation failures are recovered locally and never reach the network.
    pub fn is_validation(&self) -> bool {
        matches!(self, DashboardError::EmptySymbol)
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_prefers_server_message() {
        let err = DashboardError::status(404, Some("symbol not found"));
        assert_eq!(err.to_string(), "symbol not found");
    }

    #[test]
    fn test_status_falls_back_to_http_code() {
        assert_eq!(DashboardError::status(502, None).to_string(), "HTTP 502");
        assert_eq!(DashboardError::status(500, Some("  ")).to_string(), "HTTP 500");
    }
}
