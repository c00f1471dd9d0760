//! Lead capture sink abstraction.
//!
//! Leads are currently only logged; the trait keeps the conversation
//! core decoupled from whatever store eventually replaces the log.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A prospective customer's contact information captured
/// mid-conversation. Constructed once, sent once, not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub email: String,
    pub user_name: Option<String>,
}

/// Lead recording errors. Never surfaced to the end user; the
/// conversation flow is unaffected by a failing sink.
#[derive(Debug, Error)]
pub enum LeadError {
    #[error("lead transport failed: {0}")]
    Transport(String),
    #[error("lead sink rejected the lead (HTTP {status})")]
    Rejected { status: u16 },
}

/// Destination for captured leads. No deduplication or durability is
/// promised beyond "accepted".
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn record(&self, lead: &Lead) -> Result<(), LeadError>;
}

/// Sink that writes leads to the structured log.
#[derive(Debug, Default)]
pub struct LogLeadSink;

#[async_trait]
impl LeadSink for LogLeadSink {
    async fn record(&self, lead: &Lead) -> Result<(), LeadError> {
        tracing::info!(
            email = %lead.email,
            user_name = lead.user_name.as_deref().unwrap_or("-"),
            "lead captured"
        );
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_sink_accepts_leads() {
        let sink = LogLeadSink;
        let lead = Lead {
            email: "me@example.com".to_string(),
            user_name: None,
        };
        assert!(sink.record(&lead).await.is_ok());
    }
}
