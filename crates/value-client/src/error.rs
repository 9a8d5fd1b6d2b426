use dashboard_core::DashboardError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Timeout")]
    Timeout,

    #[error("Ungültige JSON-Antwort (HTTP {status}): {source}")]
    InvalidJson {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::RequestFailed(err)
        }
    }
}

impl From<ClientError> for DashboardError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        match err {
            ClientError::InvalidJson { .. } => DashboardError::Decode(message),
            _ => DashboardError::Transport(message),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
