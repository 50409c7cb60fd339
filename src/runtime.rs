//! Runtime for executing dialogs
//!
//! Owns the per-user sessions and drives the pure state machine against the
//! note store and the transport.

mod executor;
pub mod render;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::DialogController;
pub use render::RenderModel;
pub use traits::*;

/// Type alias for production controller with concrete implementations
pub type ProductionController = DialogController<DatabaseNoteStore>;

use crate::state_machine::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Sessions of every user who has interacted since startup
///
/// Each user gets their own lock, so turns for different users run in
/// parallel while turns for the same user are serialized.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    /// Session handle for `user_id`, created in the menu on first use
    pub async fn get_or_create(&self, user_id: &str) -> Arc<Mutex<Session>> {
        if let Some(handle) = self.sessions.read().await.get(user_id) {
            return Arc::clone(handle);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(user_id.to_string())
                .or_insert_with(|| {
                    tracing::debug!(user_id = %user_id, "Creating session");
                    Arc::new(Mutex::new(Session::menu()))
                }),
        )
    }

    #[allow(dead_code)] // Used by tests and diagnostics
    /// Copy of a user's session, if one exists
    pub async fn snapshot(&self, user_id: &str) -> Option<Session> {
        let handle = self.sessions.read().await.get(user_id).cloned()?;
        let session = handle.lock().await;
        Some(session.clone())
    }

    #[allow(dead_code)] // Used by tests and diagnostics
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_machine::DialogState;

    #[tokio::test]
    async fn test_get_or_create_returns_same_session() {
        let registry = SessionRegistry::default();
        assert_eq!(registry.snapshot("1").await, None);

        let first = registry.get_or_create("1").await;
        first.lock().await.state = DialogState::AddNote;

        let second = registry.get_or_create("1").await;
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            registry.snapshot("1").await.map(|s| s.state),
            Some(DialogState::AddNote)
        );
    }

    #[tokio::test]
    async fn test_users_get_separate_sessions() {
        let registry = SessionRegistry::default();
        registry.get_or_create("1").await.lock().await.page_number = 3;
        registry.get_or_create("2").await;

        assert_eq!(registry.len().await, 2);
        assert_eq!(registry.snapshot("1").await.unwrap().page_number, 3);
        assert_eq!(registry.snapshot("2").await.unwrap(), Session::menu());
    }
}
