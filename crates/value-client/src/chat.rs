use async_trait::async_trait;
use dashboard_core::{ChatBackend, DashboardError, HttpReply};
use reqwest::header::ACCEPT;

use crate::error::{ClientError, ClientResult};
use crate::{build_http_client, read_json_reply, ClientConfig};

/// Client for the assistant chat endpoint (form-encoded `message`).
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: build_http_client(config),
            endpoint: config.chat_url.clone(),
        }
    }

    pub async fn post_message(&self, message: &str) -> ClientResult<HttpReply> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .form(&[("message", message)])
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        read_json_reply(response).await
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    async fn send_message(&self, message: &str) -> Result<HttpReply, DashboardError> {
        Ok(self.post_message(message).await?)
    }
}
