//! API request and response types.
//!
//! History entries cross the wire in the upstream model's content
//! shape: `{role, parts: [{text}]}`.

use crate::conversation::{Role, Turn};
use serde::{Deserialize, Serialize};

/// One history entry as it crosses the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTurn {
    pub role: Role,
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePart {
    pub text: String,
}

impl From<&Turn> for WireTurn {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role,
            parts: vec![WirePart {
                text: turn.text.clone(),
            }],
        }
    }
}

impl From<WireTurn> for Turn {
    fn from(wire: WireTurn) -> Self {
        let text = wire
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");
        Self {
            role: wire.role,
            text,
        }
    }
}

/// Request to relay one message to the model.
///
/// Both fields default so that a missing `message` is reported as the
/// domain's own 400, not as a deserialization rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub history: Vec<WireTurn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Captured lead as posted by the widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRequest {
    pub email: Option<String>,
    #[serde(rename = "userName", skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadResponse {
    pub message: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_turn_round_trips_through_the_model_shape() {
        let turn = Turn::model("¡Hola! Soy Nova.");
        let wire = serde_json::to_value(WireTurn::from(&turn)).unwrap();

        assert_eq!(wire["role"], "model");
        assert_eq!(wire["parts"][0]["text"], "¡Hola! Soy Nova.");

        let back: WireTurn = serde_json::from_value(wire).unwrap();
        assert_eq!(Turn::from(back), turn);
    }

    #[test]
    fn multi_part_wire_turns_concatenate() {
        let wire: WireTurn = serde_json::from_value(serde_json::json!({
            "role": "user",
            "parts": [{"text": "hola "}, {"text": "Nova"}]
        }))
        .unwrap();

        assert_eq!(Turn::from(wire), Turn::user("hola Nova"));
    }

    #[test]
    fn lead_request_uses_camel_case_user_name() {
        let wire = serde_json::to_value(LeadRequest {
            email: Some("me@example.com".to_string()),
            user_name: Some("Ana".to_string()),
        })
        .unwrap();

        assert_eq!(wire["email"], "me@example.com");
        assert_eq!(wire["userName"], "Ana");
    }
}
