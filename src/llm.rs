//! Generative model abstraction.
//!
//! The relay treats the upstream model as an opaque completion
//! service: fixed persona plus prior turns plus the new message in,
//! text out.

mod error;
mod gemini;

pub use error::{LlmError, LlmErrorKind};
pub use gemini::GeminiService;

use crate::conversation::Turn;
use async_trait::async_trait;
use std::sync::Arc;

/// A completion request: fixed persona, prior turns, the new message,
/// and an output bound.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: String,
    pub history: Vec<Turn>,
    pub message: String,
    pub max_output_tokens: u32,
}

/// Completion text with token accounting for the logs.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub text: String,
    pub usage: Usage,
}

/// Usage statistics reported by the upstream model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Common interface for generative model providers.
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request.
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Get the model ID.
    fn model_id(&self) -> &str;
}

/// Logging wrapper for LLM services.
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "model request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "model request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
