//! Session driver: owns the context, state, and history of one
//! conversation and executes the effects produced by the pure
//! transition function.

use super::effect::Effect;
use super::event::Event;
use super::history::History;
use super::state::{ChatState, SessionContext};
use super::transition::{transition, TransitionResult};
use crate::leads::{Lead, LeadSink};
use crate::relay::Relay;
use std::sync::Arc;

/// One conversation between a user and the relay.
pub struct ChatSession<R> {
    relay: R,
    leads: Arc<dyn LeadSink>,
    context: SessionContext,
    state: ChatState,
    history: History,
}

impl<R: Relay> ChatSession<R> {
    pub fn new(relay: R, leads: Arc<dyn LeadSink>, context: SessionContext) -> Self {
        Self {
            relay,
            leads,
            context,
            state: ChatState::default(),
            history: History::default(),
        }
    }

    /// Replace the default history window.
    pub fn with_history_cap(mut self, max_turns: usize) -> Self {
        self.history = History::new(max_turns);
        self
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Process one user message and produce the text to show.
    ///
    /// The exclusive borrow keeps at most one relay call in flight per
    /// session. Failures never escape: relay errors become the fixed
    /// apology, lead-sink errors are logged and swallowed.
    pub async fn send(&mut self, text: &str) -> String {
        let result = transition(
            self.state,
            &self.context,
            Event::UserInput {
                text: text.to_string(),
            },
        );
        self.apply(result).await
    }

    async fn apply(&mut self, mut result: TransitionResult) -> String {
        // The relay contract wants the history as it stood before this
        // turn's user entry was appended.
        let prior = self.history.turns().to_vec();

        loop {
            self.state = result.next;

            let mut reply = String::new();
            let mut follow_up: Option<Event> = None;

            for effect in result.effects {
                match effect {
                    Effect::PushTurn(turn) => self.history.push(turn),
                    Effect::Reply { text } => reply = text,
                    Effect::RecordLead(lead) => self.dispatch_lead(lead),
                    Effect::CallRelay { message } => {
                        follow_up = Some(match self.relay.send(&message, &prior).await {
                            Ok(text) => Event::ModelReply { text },
                            Err(err) => {
                                tracing::warn!(error = %err, "relay call failed");
                                Event::RelayFailed {
                                    error: err.to_string(),
                                }
                            }
                        });
                    }
                }
            }

            match follow_up {
                Some(event) => result = transition(self.state, &self.context, event),
                None => return reply,
            }
        }
    }

    /// Fire-and-forget: the conversation never blocks on, nor fails
    /// due to, the lead sink.
    fn dispatch_lead(&self, lead: Lead) {
        let sink = Arc::clone(&self.leads);
        tokio::spawn(async move {
            if let Err(err) = sink.record(&lead).await {
                tracing::warn!(email = %lead.email, error = %err, "failed to record lead");
            }
        });
    }
}
