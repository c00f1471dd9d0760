//! Pure state transition function for the conversation core.
//!
//! Given the current state and an event, computes the next state and
//! the effects the driver must execute. No I/O happens here.

use super::effect::Effect;
use super::event::Event;
use super::history::Turn;
use super::state::{ChatState, EmailForwardPolicy, SessionContext};
use crate::email::is_valid_email;
use crate::leads::Lead;

/// Local re-prompt when the intercepted input fails the email grammar.
pub const INVALID_EMAIL_PROMPT: &str =
    "Parece que ese no es un email válido. ¿Podrías intentarlo de nuevo, por favor?";

/// Local acknowledgment when a captured email is not forwarded upstream.
pub const LEAD_THANKS: &str =
    "¡Gracias! Un especialista de nuestro equipo se pondrá en contacto contigo muy pronto.";

/// Shown when the relay call fails. Never exposes the underlying error.
pub const RELAY_APOLOGY: &str =
    "Lo siento, no puedo conectarme con mi inteligencia en este momento. Por favor, intenta más tarde.";

/// Substrings in a model reply that arm the email-capture branch.
const EMAIL_TRIGGERS: &[&str] = &["email", "correo electrónico"];

/// Result of a state transition.
#[derive(Debug)]
pub struct TransitionResult {
    pub next: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    fn new(next: ChatState) -> Self {
        Self {
            next,
            effects: vec![],
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function.
///
/// Given the same state, context, and event this always produces the
/// same result; the driver owns history mutation and all I/O.
pub fn transition(state: ChatState, context: &SessionContext, event: Event) -> TransitionResult {
    match (state, event) {
        (ChatState::Normal, Event::UserInput { text }) => {
            TransitionResult::new(ChatState::Normal)
                .with_effect(Effect::PushTurn(Turn::user(text.clone())))
                .with_effect(Effect::CallRelay { message: text })
        }

        (ChatState::AwaitingEmail, Event::UserInput { text }) => {
            if !is_valid_email(&text) {
                // Rejected inputs never reach the history or the relay.
                return TransitionResult::new(ChatState::AwaitingEmail).with_effect(
                    Effect::Reply {
                        text: INVALID_EMAIL_PROMPT.to_string(),
                    },
                );
            }

            let lead = Lead {
                email: text.trim().to_string(),
                user_name: context.user_name.clone(),
            };
            let result =
                TransitionResult::new(ChatState::Normal).with_effect(Effect::RecordLead(lead));

            match context.email_policy {
                EmailForwardPolicy::Forward => result
                    .with_effect(Effect::PushTurn(Turn::user(text.clone())))
                    .with_effect(Effect::CallRelay { message: text }),
                EmailForwardPolicy::Suppress => result.with_effect(Effect::Reply {
                    text: LEAD_THANKS.to_string(),
                }),
            }
        }

        (_, Event::ModelReply { text }) => {
            let next = if solicits_email(&text) {
                ChatState::AwaitingEmail
            } else {
                ChatState::Normal
            };
            TransitionResult::new(next)
                .with_effect(Effect::PushTurn(Turn::model(text.clone())))
                .with_effect(Effect::Reply { text })
        }

        // The failed user turn stays in the history; only the reply
        // is synthesized locally.
        (state, Event::RelayFailed { .. }) => {
            TransitionResult::new(state).with_effect(Effect::Reply {
                text: RELAY_APOLOGY.to_string(),
            })
        }
    }
}

/// Whether a model reply is asking the user for their email address.
///
/// Substring heuristic carried over from the original widget; kept in
/// one place so a smarter detector can replace it.
fn solicits_email(reply: &str) -> bool {
    let lower = reply.to_lowercase();
    EMAIL_TRIGGERS.iter().any(|trigger| lower.contains(trigger))
}
