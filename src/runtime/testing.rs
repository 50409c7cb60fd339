//! Mock implementations for testing
//!
//! These mocks enable controller tests without real I/O.

use super::render::RenderModel;
use super::traits::*;
use crate::state_machine::MessageId;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

// ============================================================================
// In-Memory Note Store
// ============================================================================

/// Note store backed by a map, with switchable failure injection
#[derive(Default)]
pub struct InMemoryNoteStore {
    notes: Mutex<HashMap<String, NoteCollection>>,
    failing: AtomicBool,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `StorageError::Unavailable`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Seed a note without going through the controller
    pub fn insert(&self, user_id: &str, title: &str, body: &str) {
        self.notes
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .insert(capitalize_title(title), body.to_string());
    }

    /// Snapshot of a user's notes
    pub fn notes(&self, user_id: &str) -> NoteCollection {
        self.notes
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn put_note(&self, user_id: &str, title: &str, body: &str) -> Result<(), StorageError> {
        self.check()?;
        self.insert(user_id, title, body);
        Ok(())
    }

    async fn get_all_notes(&self, user_id: &str) -> Result<NoteCollection, StorageError> {
        self.check()?;
        Ok(self.notes(user_id))
    }

    async fn delete_note(&self, user_id: &str, title: &str) -> Result<(), StorageError> {
        self.check()?;
        if let Some(notes) = self.notes.lock().unwrap().get_mut(user_id) {
            notes.remove(title);
        }
        Ok(())
    }
}

// ============================================================================
// Failing Sink
// ============================================================================

/// Transport that rejects every outbound call
pub struct FailingSink;

#[async_trait]
impl ReplySink for FailingSink {
    async fn send_reply(&self, _user_id: &str, _reply: &RenderModel) -> Result<(), TransportError> {
        Err(TransportError("chat unreachable".to_string()))
    }

    async fn delete_message(
        &self,
        _user_id: &str,
        _message_id: MessageId,
    ) -> Result<(), TransportError> {
        Err(TransportError("chat unreachable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store_semantics() {
        let store = InMemoryNoteStore::new();

        store.put_note("1", "groceries", "Milk").await.unwrap();
        store.put_note("1", "Groceries", "Milk, eggs").await.unwrap();
        store.put_note("2", "groceries", "Bread").await.unwrap();

        let notes = store.get_all_notes("1").await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes["Groceries"], "Milk, eggs");
        assert_eq!(store.notes("2")["Groceries"], "Bread");

        store.delete_note("1", "Groceries").await.unwrap();
        store.delete_note("1", "Groceries").await.unwrap();
        assert!(store.get_all_notes("1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = InMemoryNoteStore::new();
        store.set_failing(true);
        assert!(store.get_all_notes("1").await.is_err());
        assert!(store.put_note("1", "A", "b").await.is_err());

        store.set_failing(false);
        assert!(store.get_all_notes("1").await.unwrap().is_empty());
    }
}
