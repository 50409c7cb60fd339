//! API request and response types

use crate::runtime::RenderModel;
use crate::state_machine::{EventKind, IncomingEvent, MessageId};
use serde::{Deserialize, Serialize};

/// Request delivering one inbound event
#[derive(Debug, Deserialize)]
pub struct EventRequest {
    pub user_id: String,
    pub kind: EventKind,
    pub payload: String,
    #[serde(default)]
    pub message_id: Option<MessageId>,
}

impl From<EventRequest> for IncomingEvent {
    fn from(req: EventRequest) -> Self {
        IncomingEvent {
            user_id: req.user_id,
            kind: req.kind,
            payload: req.payload,
            message_id: req.message_id,
        }
    }
}

/// Everything the dialog produced for one event
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// Replies in the order they should be shown
    pub replies: Vec<RenderModel>,
    /// Inbound messages the transport should remove
    pub deleted_messages: Vec<MessageId>,
}

/// Response for version endpoint
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
