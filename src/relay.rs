//! Client-side transport: the widget's view of the relay service.

use crate::api::{ChatRequest, ChatResponse, LeadRequest, WireTurn};
use crate::conversation::Turn;
use crate::leads::{Lead, LeadError, LeadSink};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

const CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport to the chat relay.
#[async_trait]
pub trait Relay: Send + Sync {
    /// Send `message` with `history` as prior context; returns the
    /// model's reply text.
    async fn send(&self, message: &str, history: &[Turn]) -> Result<String, RelayError>;
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay returned HTTP {status}")]
    Status { status: u16 },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// HTTP client for the relay's `/chat` endpoint.
pub struct RelayClient {
    client: Client,
    chat_url: String,
}

impl RelayClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: http_client(),
            chat_url: format!("{}/chat", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl Relay for RelayClient {
    async fn send(&self, message: &str, history: &[Turn]) -> Result<String, RelayError> {
        let body = ChatRequest {
            message: message.to_string(),
            history: history.iter().map(WireTurn::from).collect(),
        };

        let response = self.client.post(&self.chat_url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status {
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response.json().await?;
        Ok(body.response)
    }
}

/// Lead sink that forwards captures to the relay's `/leads` endpoint.
pub struct HttpLeadSink {
    client: Client,
    leads_url: String,
}

impl HttpLeadSink {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: http_client(),
            leads_url: format!("{}/leads", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl LeadSink for HttpLeadSink {
    async fn record(&self, lead: &Lead) -> Result<(), LeadError> {
        let body = LeadRequest {
            email: Some(lead.email.clone()),
            user_name: lead.user_name.clone(),
        };

        let response = self
            .client
            .post(&self.leads_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LeadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LeadError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

fn http_client() -> Client {
    Client::builder()
        .timeout(CLIENT_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}
