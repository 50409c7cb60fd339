//! Render model handed to the presentation layer

use super::traits::NoteCollection;
use crate::i18n::{Label, Translator};
use crate::pagination::{display_order, render_page};
use crate::state_machine::{Action, DialogState, Session};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A selectable control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSpec {
    pub label: String,
    /// Payload the transport sends back when the button is clicked
    pub id: String,
}

impl ButtonSpec {
    fn new(label: impl Into<String>, action: &Action) -> Self {
        Self {
            label: label.into(),
            id: action.to_string(),
        }
    }
}

/// Scroller state; only present when there is more than one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationControls {
    pub current_page: usize,
    pub total_pages: usize,
}

/// What one turn shows to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderModel {
    pub text: String,
    pub buttons: Vec<ButtonSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationControls>,
}

impl RenderModel {
    /// Plain text without controls
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
            pagination: None,
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn button_ids(&self) -> Vec<&str> {
        self.buttons.iter().map(|b| b.id.as_str()).collect()
    }
}

/// Builds windows from session state
#[derive(Clone)]
pub struct Renderer {
    translator: Arc<dyn Translator>,
    capacity: usize,
}

impl Renderer {
    pub fn new(translator: Arc<dyn Translator>, capacity: usize) -> Self {
        Self {
            translator,
            capacity: capacity.max(1),
        }
    }

    pub fn label(&self, label: Label) -> String {
        self.translator.label(label)
    }

    pub fn notice(&self, label: Label) -> RenderModel {
        RenderModel::notice(self.label(label))
    }

    /// Whether rendering `session` needs the user's notes
    pub fn needs_notes(session: &Session) -> bool {
        session.state == DialogState::NotesList
    }

    /// Render the window for `session`
    ///
    /// `notes` must be provided when [`Renderer::needs_notes`] is true. The
    /// list window may correct `page_number` and drop an open note that no
    /// longer exists, so the session is taken mutably.
    pub fn render(&self, session: &mut Session, notes: Option<&NoteCollection>) -> RenderModel {
        match session.state {
            DialogState::Menu => self.menu(),
            DialogState::AddNote => self.add_note(session),
            DialogState::NotesList => {
                let empty = NoteCollection::new();
                self.notes_list(session, notes.unwrap_or(&empty))
            }
        }
    }

    fn menu(&self) -> RenderModel {
        RenderModel {
            text: self.label(Label::MenuText),
            buttons: vec![
                ButtonSpec::new(self.label(Label::ListNotes), &Action::List),
                ButtonSpec::new(self.label(Label::AddNote), &Action::Add),
            ],
            pagination: None,
        }
    }

    fn add_note(&self, session: &Session) -> RenderModel {
        let prompt = if session.is_awaiting_body() {
            Label::EnterNote
        } else {
            Label::EnterTitle
        };
        RenderModel {
            text: self.label(prompt),
            buttons: vec![ButtonSpec::new(self.label(Label::Cancel), &Action::Cancel)],
            pagination: None,
        }
    }

    fn notes_list(&self, session: &mut Session, notes: &NoteCollection) -> RenderModel {
        if let Some(title) = &session.draft_note_open {
            if let Some(body) = notes.get(title) {
                return RenderModel {
                    text: body.clone(),
                    buttons: vec![
                        ButtonSpec::new(self.label(Label::Delete), &Action::Delete),
                        ButtonSpec::new(self.label(Label::Back), &Action::Back),
                    ],
                    pagination: None,
                };
            }
            tracing::debug!(title = %title, "Open note no longer exists, showing list");
            session.draft_note_open = None;
        }

        let back = ButtonSpec::new(self.label(Label::Back), &Action::Back);
        let titles = display_order(notes);
        let page = render_page(session.page_number, &titles, self.capacity);
        session.page_number = page.page_number;

        if page.is_empty() {
            return RenderModel {
                text: self.label(Label::NoNotes),
                buttons: vec![back],
                pagination: None,
            };
        }

        let text = page
            .items
            .iter()
            .map(|(index, title)| format!("{index}. {title}"))
            .collect::<Vec<_>>()
            .join("\n");

        let mut buttons: Vec<ButtonSpec> = page
            .items
            .into_iter()
            .map(|(index, title)| ButtonSpec::new(index.to_string(), &Action::Open { title }))
            .collect();
        buttons.push(back);

        let pagination = (page.total_pages > 1).then_some(PaginationControls {
            current_page: page.page_number,
            total_pages: page.total_pages,
        });

        RenderModel {
            text,
            buttons,
            pagination,
        }
    }
}
