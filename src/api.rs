//! HTTP API for the chat relay.

mod handlers;
mod types;

pub use handlers::{cors_layer, create_router};
pub use types::{ChatRequest, ChatResponse, ErrorResponse, LeadRequest, LeadResponse, WirePart, WireTurn};

use crate::leads::LeadSink;
use crate::llm::LlmService;
use std::sync::Arc;

/// Application state shared across handlers.
///
/// Stateless per request by design: every `/chat` call carries its own
/// history payload, so concurrent sessions share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmService>,
    pub leads: Arc<dyn LeadSink>,
}

impl AppState {
    pub fn new(llm: Arc<dyn LlmService>, leads: Arc<dyn LeadSink>) -> Self {
        Self { llm, leads }
    }
}
