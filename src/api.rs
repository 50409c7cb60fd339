//! HTTP transport adapter
//!
//! The chat transport posts each inbound message or button click and gets
//! back the replies to show and the messages to delete.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::config::AllowedUsers;
use crate::db::Database;
use crate::i18n::Translator;
use crate::runtime::{DatabaseNoteStore, ProductionController};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ProductionController>,
    pub allowed_users: Arc<AllowedUsers>,
}

impl AppState {
    pub fn new(
        db: Database,
        translator: Arc<dyn Translator>,
        capacity: usize,
        allowed_users: AllowedUsers,
    ) -> Self {
        Self {
            controller: Arc::new(ProductionController::new(
                DatabaseNoteStore::new(db),
                translator,
                capacity,
            )),
            allowed_users: Arc::new(allowed_users),
        }
    }
}
