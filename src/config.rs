//! Process configuration from the environment.

use crate::conversation::{EmailForwardPolicy, DEFAULT_MAX_TURNS};
use axum::http::HeaderValue;

/// Origins allowed to call the relay when none are configured.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["https://decoarche.com", "https://www.decoarche.com"];

#[derive(Debug, Clone)]
pub struct Config {
    /// Server: listen port (Render convention, `PORT`).
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub allowed_origins: Vec<String>,
    /// Widget: base URL of a running relay.
    pub relay_url: String,
    pub user_name: Option<String>,
    pub history_cap: usize,
    pub email_policy: EmailForwardPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            allowed_origins: std::env::var("NOVA_ALLOWED_ORIGINS")
                .ok()
                .map(|raw| parse_origins(&raw))
                .unwrap_or_else(default_origins),
            relay_url: std::env::var("NOVA_RELAY_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            user_name: std::env::var("NOVA_USER_NAME")
                .ok()
                .filter(|name| !name.trim().is_empty()),
            history_cap: std::env::var("NOVA_HISTORY_CAP")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DEFAULT_MAX_TURNS),
            email_policy: std::env::var("NOVA_LEAD_FORWARD")
                .ok()
                .map(|raw| parse_policy(&raw))
                .unwrap_or_default(),
        }
    }

    /// Origins as header values for the CORS layer. Unparseable
    /// entries are dropped rather than taking the server down.
    pub fn origin_values(&self) -> Vec<HeaderValue> {
        self.allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect()
    }
}

fn default_origins() -> Vec<String> {
    DEFAULT_ALLOWED_ORIGINS
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_policy(raw: &str) -> EmailForwardPolicy {
    match raw.trim().to_ascii_lowercase().as_str() {
        "suppress" => EmailForwardPolicy::Suppress,
        "forward" => EmailForwardPolicy::Forward,
        other => {
            tracing::warn!(value = other, "unknown NOVA_LEAD_FORWARD value, using default");
            EmailForwardPolicy::default()
        }
    }
}
