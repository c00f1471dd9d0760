//! Effects produced by state transitions.

use super::history::Turn;
use crate::leads::Lead;

/// Effects to be executed by the session driver after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the session history.
    PushTurn(Turn),
    /// Forward `message` to the relay, with the history as it stood
    /// before this turn as context.
    CallRelay { message: String },
    /// Dispatch a captured lead to the lead sink (fire-and-forget).
    RecordLead(Lead),
    /// Show `text` to the user.
    Reply { text: String },
}
