//! Session state types.

use serde::{Deserialize, Serialize};

/// Conversation state: free text, or intercepting the next user
/// input as an email-capture response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    #[default]
    Normal,
    AwaitingEmail,
}

/// What to do with the message that carried a valid email address.
///
/// The original widget forwarded it to the relay as ordinary
/// conversational content; `Suppress` keeps it out of the history and
/// acknowledges locally instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailForwardPolicy {
    #[default]
    Forward,
    Suppress,
}

/// Per-session configuration and captured identity. Lives for one
/// widget session, in memory only.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user_name: Option<String>,
    pub email_policy: EmailForwardPolicy,
}
