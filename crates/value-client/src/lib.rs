pub mod chat;
pub mod error;
pub mod value_analysis;

pub use chat::ChatClient;
pub use error::{ClientError, ClientResult};
pub use value_analysis::ValueAnalysisClient;

use std::time::Duration;

use dashboard_core::HttpReply;
use serde_json::Value;

/// Endpoints and limits for the dashboard's backend calls.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub value_analysis_url: String,
    pub chat_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            value_analysis_url: std::env::var("VALUE_ANALYSIS_URL")
                .unwrap_or_else(|_| "http://localhost:8080/value-analysis".to_string()),
            chat_url: std::env::var("AI_CHAT_URL")
                .unwrap_or_else(|_| "http://localhost:8080/ai-chat".to_string()),
            timeout: Duration::from_secs(
                std::env::var("DASHBOARD_HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

fn build_http_client(config: &ClientConfig) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Reads the body as JSON whatever the status code.
async fn read_json_reply(response: reqwest::Response) -> ClientResult<HttpReply> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.map_err(ClientError::from_reqwest)?;
    let body: Value = serde_json::from_slice(&bytes)
        .map_err(|source| ClientError::InvalidJson { status, source })?;
    Ok(HttpReply::new(status, body))
}

#[cfg(test)]
pub(crate) mod test_server {
    use axum::Router;

    /// Serves `app` on an ephemeral local port and returns its base URL.
    pub async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// A URL nothing is listening on.
    pub async fn closed_port_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }
}
