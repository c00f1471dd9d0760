//! Events that drive the session state machine.

/// Events that trigger state transitions.
#[derive(Debug, Clone)]
pub enum Event {
    /// Raw text submitted by the user.
    UserInput { text: String },
    /// Text returned by the relay for the current turn.
    ModelReply { text: String },
    /// The relay call failed: network error, timeout, or non-2xx.
    RelayFailed { error: String },
}
