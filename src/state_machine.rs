//! Core dialog state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{Action, Event, EventKind, IncomingEvent, MessageId};
pub use state::{DialogState, Session};
pub use transition::transition;
