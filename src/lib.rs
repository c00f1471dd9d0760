//! NovaAI chat relay and conversation client.
//!
//! A customer-facing chat conversation core plus a minimal backend
//! proxy that forwards conversation turns to a hosted generative
//! model and opportunistically captures an email address as a sales
//! lead.

pub mod api;
pub mod config;
pub mod conversation;
pub mod email;
pub mod leads;
pub mod llm;
pub mod persona;
pub mod relay;
