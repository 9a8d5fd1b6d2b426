use async_trait::async_trait;
use dashboard_core::{DashboardError, HttpReply, ReportSource};
use reqwest::header::ACCEPT;

use crate::error::{ClientError, ClientResult};
use crate::{build_http_client, read_json_reply, ClientConfig};

/// Client for the value-analysis JSON endpoint.
#[derive(Clone)]
pub struct ValueAnalysisClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ValueAnalysisClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: build_http_client(config),
            endpoint: config.value_analysis_url.clone(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&ClientConfig::default())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET `<endpoint>?symbol=..&format=json`. Failure statuses come back as
    /// an `HttpReply`, not an error.
    pub async fn get_analysis(&self, symbol: &str) -> ClientResult<HttpReply> {
        tracing::debug!("Requesting value analysis for {} from {}", symbol, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("symbol", symbol), ("format", "json")])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let reply = read_json_reply(response).await?;
        if !reply.is_success() {
            tracing::warn!("Value analysis for {} returned HTTP {}", symbol, reply.status);
        }
        Ok(reply)
    }
}

#[async_trait]
impl ReportSource for ValueAnalysisClient {
    async fn fetch_report(&self, symbol: &str) -> Result<HttpReply, DashboardError> {
        Ok(self.get_analysis(symbol).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::time::Duration;

    fn config_for(url: String) -> ClientConfig {
        ClientConfig {
            value_analysis_url: url,
            chat_url: String::new(),
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    async fn echo(
        Query(params): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> (StatusCode, Json<Value>) {
        let accept = headers
            .get("accept")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        match params.get("symbol").map(String::as_str) {
            Some("MISSING") => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "symbol not found" })),
            ),
            _ => (
                StatusCode::OK,
                Json(json!({
                    "symbol": params.get("symbol"),
                    "format": params.get("format"),
                    "accept": accept,
                })),
            ),
        }
    }

    #[tokio::test]
    async fn test_sends_symbol_format_and_accept() {
        let base = test_server::spawn(Router::new().route("/value-analysis", get(echo))).await;
        let client = ValueAnalysisClient::new(&config_for(format!("{}/value-analysis", base)));

        let reply = client.get_analysis("BRK B").await.unwrap();
        assert!(reply.is_success());
        assert_eq!(reply.body["symbol"], "BRK B");
        assert_eq!(reply.body["format"], "json");
        assert_eq!(reply.body["accept"], "application/json");
    }

    #[tokio::test]
    async fn test_failure_status_keeps_body() {
        let base = test_server::spawn(Router::new().route("/value-analysis", get(echo))).await;
        let client = ValueAnalysisClient::new(&config_for(format!("{}/value-analysis", base)));

        let reply = client.fetch_report("MISSING").await.unwrap();
        assert_eq!(reply.status, 404);
        assert_eq!(reply.error_message().as_deref(), Some("symbol not found"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let app = Router::new().route(
            "/value-analysis",
            get(|| async { (StatusCode::BAD_GATEWAY, "<html>gateway</html>") }),
        );
        let base = test_server::spawn(app).await;
        let client = ValueAnalysisClient::new(&config_for(format!("{}/value-analysis", base)));

        let err = client.fetch_report("AAPL").await.unwrap_err();
        assert!(matches!(err, DashboardError::Decode(_)));
        assert!(err.to_string().contains("HTTP 502"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let url = test_server::closed_port_url().await;
        let client = ValueAnalysisClient::new(&config_for(url));

        let err = client.fetch_report("AAPL").await.unwrap_err();
        assert!(matches!(err, DashboardError::Transport(_)));
    }
}
