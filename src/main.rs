//! NovaAI chat relay — backend proxy for the chat widget.
//!
//! Stateless per request: attaches the fixed persona, forwards the
//! turn to Gemini, and accepts captured leads.

use nova_relay::api::{cors_layer, create_router, AppState};
use nova_relay::config::Config;
use nova_relay::leads::LogLeadSink;
use nova_relay::llm::{GeminiService, LoggingService};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nova_relay=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = Config::from_env();

    let Some(api_key) = config.gemini_api_key.clone() else {
        return Err("GEMINI_API_KEY is not set".into());
    };

    let llm = Arc::new(LoggingService::new(Arc::new(GeminiService::new(api_key))));
    let state = AppState::new(llm, Arc::new(LogLeadSink));

    let app = create_router(state)
        .layer(cors_layer(config.origin_values()))
        .layer(CompressionLayer::new().gzip(true).br(true).deflate(true).zstd(true))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(origins = ?config.allowed_origins, "NovaAI relay listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
