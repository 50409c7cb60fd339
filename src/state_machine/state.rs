//! Dialog state types

use serde::{Deserialize, Serialize};

/// Window the user is currently looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DialogState {
    /// Two buttons: list notes, add a note
    #[default]
    Menu,

    /// Collecting a title, then a body, from plain text messages
    AddNote,

    /// Browsing the paginated list, or reading one note
    NotesList,
}

/// Per-user conversation scratch data
///
/// Lives in memory for the lifetime of the process and is never written to
/// the note store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub state: DialogState,
    /// Title captured by the first `AddNote` text message
    pub draft_title: Option<String>,
    /// Title of the note currently displayed in `NotesList`
    pub draft_note_open: Option<String>,
    pub page_number: usize,
}

impl Session {
    /// Session parked on the menu with drafts cleared and the list rewound
    pub fn menu() -> Self {
        Self::default()
    }

    pub fn is_note_open(&self) -> bool {
        self.draft_note_open.is_some()
    }

    pub fn is_awaiting_body(&self) -> bool {
        self.state == DialogState::AddNote && self.draft_title.is_some()
    }

    pub(crate) fn clear_drafts(&mut self) {
        self.draft_title = None;
        self.draft_note_open = None;
    }
}
