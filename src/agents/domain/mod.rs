//! Domain types for the agent roster
//!
//! Descriptors loaded from the team configuration, chat messages sent to the
//! backend, and the per-agent results produced by a fan-out.

mod agent;
mod message;
mod response;

pub use agent::*;
pub use message::*;
pub use response::*;
