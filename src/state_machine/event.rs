//! Events that can occur in a dialog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Transport-assigned id of an inbound message
pub type MessageId = i64;

/// Command that (re)starts the dialog from the menu
pub const START_COMMAND: &str = "/start";

/// Kind of payload carried by an inbound event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Text,
    ButtonClick,
}

/// Event as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingEvent {
    pub user_id: String,
    pub kind: EventKind,
    pub payload: String,
    /// Id of the message that carried a text payload, if the transport
    /// supports deleting it
    #[serde(default)]
    pub message_id: Option<MessageId>,
}

impl IncomingEvent {
    #[allow(dead_code)] // Constructors for transports and tests
    pub fn text(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind: EventKind::Text,
            payload: text.into(),
            message_id: None,
        }
    }

    #[allow(dead_code)] // Constructors for transports and tests
    pub fn button(user_id: impl Into<String>, action: &Action) -> Self {
        Self {
            user_id: user_id.into(),
            kind: EventKind::ButtonClick,
            payload: action.to_string(),
            message_id: None,
        }
    }

    #[allow(dead_code)] // Constructors for transports and tests
    pub fn with_message_id(mut self, message_id: MessageId) -> Self {
        self.message_id = Some(message_id);
        self
    }
}

/// Button actions, encoded as the button id sent back by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List,
    Add,
    Cancel,
    Back,
    Delete,
    Open { title: String },
    PageChanged { page: usize },
}

const OPEN_PREFIX: &str = "note:";
const PAGE_PREFIX: &str = "page:";

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::List => f.write_str("list"),
            Action::Add => f.write_str("add"),
            Action::Cancel => f.write_str("cancel"),
            Action::Back => f.write_str("back"),
            Action::Delete => f.write_str("delete"),
            Action::Open { title } => write!(f, "{OPEN_PREFIX}{title}"),
            Action::PageChanged { page } => write!(f, "{PAGE_PREFIX}{page}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EventParseError {
    #[error("Unknown button id: {0}")]
    UnknownButton(String),
    #[error("Invalid page number: {0}")]
    InvalidPage(String),
}

impl FromStr for Action {
    type Err = EventParseError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        match id {
            "list" => Ok(Action::List),
            "add" => Ok(Action::Add),
            "cancel" => Ok(Action::Cancel),
            "back" => Ok(Action::Back),
            "delete" => Ok(Action::Delete),
            _ => {
                if let Some(title) = id.strip_prefix(OPEN_PREFIX) {
                    if title.is_empty() {
                        return Err(EventParseError::UnknownButton(id.to_string()));
                    }
                    Ok(Action::Open {
                        title: title.to_string(),
                    })
                } else if let Some(page) = id.strip_prefix(PAGE_PREFIX) {
                    page.parse()
                        .map(|page| Action::PageChanged { page })
                        .map_err(|_| EventParseError::InvalidPage(page.to_string()))
                } else {
                    Err(EventParseError::UnknownButton(id.to_string()))
                }
            }
        }
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The start command; always returns to the menu
    Start,
    Text {
        text: String,
        message_id: Option<MessageId>,
    },
    Button(Action),
}

impl TryFrom<&IncomingEvent> for Event {
    type Error = EventParseError;

    fn try_from(incoming: &IncomingEvent) -> Result<Self, Self::Error> {
        match incoming.kind {
            EventKind::Text if incoming.payload.trim() == START_COMMAND => Ok(Event::Start),
            EventKind::Text => Ok(Event::Text {
                text: incoming.payload.clone(),
                message_id: incoming.message_id,
            }),
            EventKind::ButtonClick => incoming.payload.parse().map(Event::Button),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_ids_parse_back() {
        let actions = [
            Action::List,
            Action::Add,
            Action::Cancel,
            Action::Back,
            Action::Delete,
            Action::Open {
                title: "Groceries: weekly".to_string(),
            },
            Action::PageChanged { page: 3 },
        ];
        for action in actions {
            assert_eq!(action.to_string().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_bad_button_ids() {
        assert_eq!(
            "shrug".parse::<Action>(),
            Err(EventParseError::UnknownButton("shrug".to_string()))
        );
        assert_eq!(
            "page:-1".parse::<Action>(),
            Err(EventParseError::InvalidPage("-1".to_string()))
        );
        assert!("note:".parse::<Action>().is_err());
    }

    #[test]
    fn test_start_command_is_recognized() {
        let event = Event::try_from(&IncomingEvent::text("1", " /start ")).unwrap();
        assert_eq!(event, Event::Start);
    }

    #[test]
    fn test_text_keeps_message_id() {
        let incoming = IncomingEvent::text("1", "Groceries").with_message_id(77);
        assert_eq!(
            Event::try_from(&incoming).unwrap(),
            Event::Text {
                text: "Groceries".to_string(),
                message_id: Some(77),
            }
        );
    }

    #[test]
    fn test_incoming_event_wire_format() {
        let incoming: IncomingEvent = serde_json::from_str(
            r#"{"user_id": "42", "kind": "button_click", "payload": "page:2"}"#,
        )
        .unwrap();
        assert_eq!(incoming.kind, EventKind::ButtonClick);
        assert_eq!(incoming.message_id, None);
        assert_eq!(
            Event::try_from(&incoming).unwrap(),
            Event::Button(Action::PageChanged { page: 2 })
        );
    }
}
