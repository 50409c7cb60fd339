//! Effects produced by state transitions

use super::event::MessageId;
use crate::i18n::Label;

/// Effects to be executed after state transition
///
/// The runtime executes them in order and only commits the new session once
/// all of them, and the following render, succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upsert a note in the user's collection
    PutNote { title: String, body: String },

    /// Remove a note from the user's collection
    DeleteNote { title: String },

    /// Send a standalone notice before the window is re-rendered
    Notify { label: Label },

    /// Remove an inbound message from the chat
    DeleteMessage { message_id: MessageId },
}

impl Effect {
    pub fn put_note(title: impl Into<String>, body: impl Into<String>) -> Self {
        Effect::PutNote {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn delete_note(title: impl Into<String>) -> Self {
        Effect::DeleteNote {
            title: title.into(),
        }
    }

    #[allow(dead_code)] // Used by tests
    /// Whether executing this effect touches the note store
    pub fn is_storage(&self) -> bool {
        matches!(self, Effect::PutNote { .. } | Effect::DeleteNote { .. })
    }
}
