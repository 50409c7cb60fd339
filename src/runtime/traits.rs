//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the controller with mock implementations.

use super::render::RenderModel;
use crate::db::{Database, DbError};
use crate::state_machine::MessageId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Every note of one user, title to body
///
/// The backing store gives no ordering guarantee; see
/// [`crate::pagination::display_order`].
pub type NoteCollection = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Note store unavailable: {0}")]
    Unavailable(String),
}

impl From<DbError> for StorageError {
    fn from(e: DbError) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}

#[derive(Debug, Error)]
#[error("Transport error: {0}")]
pub struct TransportError(pub String);

/// Durable per-user note collections
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Upsert a note; the title is capitalized before storage
    async fn put_note(&self, user_id: &str, title: &str, body: &str) -> Result<(), StorageError>;

    /// All notes of a user, empty when the user has none
    async fn get_all_notes(&self, user_id: &str) -> Result<NoteCollection, StorageError>;

    /// Remove a note; removing an absent title is not an error
    async fn delete_note(&self, user_id: &str, title: &str) -> Result<(), StorageError>;
}

/// Outbound half of the transport
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Show a window (or a plain notice) to the user
    async fn send_reply(&self, user_id: &str, reply: &RenderModel) -> Result<(), TransportError>;

    /// Remove a message the user sent
    async fn delete_message(
        &self,
        user_id: &str,
        message_id: MessageId,
    ) -> Result<(), TransportError>;
}

/// Normalize a note title for storage: first character upper case, the
/// rest lower case
pub fn capitalize_title(title: &str) -> String {
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: NoteStore + ?Sized> NoteStore for Arc<T> {
    async fn put_note(&self, user_id: &str, title: &str, body: &str) -> Result<(), StorageError> {
        (**self).put_note(user_id, title, body).await
    }

    async fn get_all_notes(&self, user_id: &str) -> Result<NoteCollection, StorageError> {
        (**self).get_all_notes(user_id).await
    }

    async fn delete_note(&self, user_id: &str, title: &str) -> Result<(), StorageError> {
        (**self).delete_note(user_id, title).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter to use Database as a `NoteStore`
///
/// One hash per user keyed by the user id; fields are titles, values are
/// bodies.
#[derive(Clone)]
pub struct DatabaseNoteStore {
    db: Database,
}

impl DatabaseNoteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteStore for DatabaseNoteStore {
    async fn put_note(&self, user_id: &str, title: &str, body: &str) -> Result<(), StorageError> {
        self.db.hset(user_id, &capitalize_title(title), body)?;
        Ok(())
    }

    async fn get_all_notes(&self, user_id: &str) -> Result<NoteCollection, StorageError> {
        Ok(self.db.hgetall(user_id)?)
    }

    async fn delete_note(&self, user_id: &str, title: &str) -> Result<(), StorageError> {
        self.db.hdel(user_id, &[title])?;
        Ok(())
    }
}

/// Sink that buffers everything sent during one turn
///
/// Used by the HTTP adapter to hand the replies back in the response body.
#[derive(Debug, Default)]
pub struct CollectingSink {
    replies: Mutex<Vec<RenderModel>>,
    deleted: Mutex<Vec<MessageId>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)] // Used by tests
    pub fn replies(&self) -> Vec<RenderModel> {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[allow(dead_code)] // Used by tests
    pub fn deleted(&self) -> Vec<MessageId> {
        self.deleted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[allow(dead_code)] // Used by tests
    pub fn last_reply(&self) -> Option<RenderModel> {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn into_parts(self) -> (Vec<RenderModel>, Vec<MessageId>) {
        (
            self.replies
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
            self.deleted
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

#[async_trait]
impl ReplySink for CollectingSink {
    async fn send_reply(&self, _user_id: &str, reply: &RenderModel) -> Result<(), TransportError> {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(reply.clone());
        Ok(())
    }

    async fn delete_message(
        &self,
        _user_id: &str,
        message_id: MessageId,
    ) -> Result<(), TransportError> {
        self.deleted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message_id);
        Ok(())
    }
}
