//! Pure state transition function
//!
//! | State     | Event                | Next                                    |
//! |-----------|----------------------|-----------------------------------------|
//! | any       | `Start`              | `Menu`, drafts cleared, page 0          |
//! | Menu      | `list`               | `NotesList`, page 0                     |
//! | Menu      | `add`                | `AddNote`                               |
//! | AddNote   | text (no title yet)  | `AddNote`, title captured               |
//! | AddNote   | text (title set)     | `Menu`, note stored, drafts cleared     |
//! | AddNote   | `cancel`             | `Menu`, drafts cleared                  |
//! | NotesList | `note:<title>`       | `NotesList`, note opened                |
//! | NotesList | `back` (note open)   | `NotesList`, note closed                |
//! | NotesList | `back` (no note)     | `Menu`, page 0                          |
//! | NotesList | `delete` (note open) | `NotesList`, note deleted and closed    |
//! | NotesList | `page:<n>`           | `NotesList`, page `n`                   |
//!
//! Everything else is an invalid transition.

use super::{Action, DialogState, Effect, Event, Session};
use crate::i18n::Label;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_session: Session,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(session: Session) -> Self {
        Self {
            new_session: session,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_effects(mut self, effects: impl IntoIterator<Item = Effect>) -> Self {
        self.effects.extend(effects);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl TransitionError {
    fn invalid(state: DialogState, event: &Event) -> Self {
        TransitionError::InvalidTransition(format!("{event:?} in {state:?}"))
    }
}

/// Pure transition function
///
/// Given the same session and event it always produces the same result,
/// with no I/O. Note store writes and transport instructions are returned
/// as effects.
pub fn transition(session: &Session, event: Event) -> Result<TransitionResult, TransitionError> {
    match (session.state, event) {
        (_, Event::Start) => Ok(TransitionResult::new(Session::menu())),

        // ============================================================
        // Menu
        // ============================================================
        (DialogState::Menu, Event::Button(Action::List)) => {
            Ok(TransitionResult::new(Session {
                state: DialogState::NotesList,
                draft_title: None,
                draft_note_open: None,
                page_number: 0,
            }))
        }

        (DialogState::Menu, Event::Button(Action::Add)) => Ok(TransitionResult::new(Session {
            state: DialogState::AddNote,
            draft_title: None,
            draft_note_open: None,
            page_number: session.page_number,
        })),

        // ============================================================
        // AddNote: two-phase capture
        // ============================================================
        (DialogState::AddNote, Event::Text { text, message_id }) => {
            let delete_message = message_id.map(|message_id| Effect::DeleteMessage { message_id });

            match &session.draft_title {
                None => {
                    let title = text.trim();
                    if title.is_empty() {
                        return Err(TransitionError::InvalidTransition(
                            "empty note title".to_string(),
                        ));
                    }
                    let mut next = session.clone();
                    next.draft_title = Some(title.to_string());
                    Ok(TransitionResult::new(next).with_effects(delete_message))
                }
                Some(title) => {
                    let mut next = session.clone();
                    next.state = DialogState::Menu;
                    next.clear_drafts();
                    Ok(TransitionResult::new(next)
                        .with_effect(Effect::put_note(title.clone(), text))
                        .with_effect(Effect::Notify {
                            label: Label::Saved,
                        })
                        .with_effects(delete_message))
                }
            }
        }

        (DialogState::AddNote, Event::Button(Action::Cancel)) => {
            let mut next = session.clone();
            next.state = DialogState::Menu;
            next.clear_drafts();
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // NotesList
        // ============================================================
        (DialogState::NotesList, Event::Button(Action::Open { title }))
            if !session.is_note_open() =>
        {
            let mut next = session.clone();
            next.draft_note_open = Some(title);
            Ok(TransitionResult::new(next))
        }

        (DialogState::NotesList, Event::Button(Action::Back)) => {
            let mut next = session.clone();
            if session.is_note_open() {
                next.draft_note_open = None;
            } else {
                next.state = DialogState::Menu;
                next.page_number = 0;
            }
            Ok(TransitionResult::new(next))
        }

        (DialogState::NotesList, Event::Button(Action::Delete)) => {
            let Some(title) = &session.draft_note_open else {
                return Err(TransitionError::InvalidTransition(
                    "delete with no open note".to_string(),
                ));
            };
            let mut next = session.clone();
            next.draft_note_open = None;
            Ok(TransitionResult::new(next).with_effect(Effect::delete_note(title.clone())))
        }

        (DialogState::NotesList, Event::Button(Action::PageChanged { page }))
            if !session.is_note_open() =>
        {
            let mut next = session.clone();
            next.page_number = page;
            Ok(TransitionResult::new(next))
        }

        (state, event) => Err(TransitionError::invalid(state, &event)),
    }
}
