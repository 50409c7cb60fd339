//! Display labels and their translation
//!
//! The dialog only ever asks for a fixed set of labels. The catalog ships
//! English strings and can be overridden from a JSON object file keyed by
//! label id.

use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Every fixed string the dialog renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    MenuText,
    ListNotes,
    AddNote,
    EnterTitle,
    EnterNote,
    Saved,
    NoNotes,
    Back,
    Delete,
    Cancel,
    Failure,
}

impl Label {
    pub const ALL: [Label; 11] = [
        Label::MenuText,
        Label::ListNotes,
        Label::AddNote,
        Label::EnterTitle,
        Label::EnterNote,
        Label::Saved,
        Label::NoNotes,
        Label::Back,
        Label::Delete,
        Label::Cancel,
        Label::Failure,
    ];

    /// Catalog key for this label
    pub fn key(self) -> &'static str {
        match self {
            Label::MenuText => "command-select",
            Label::ListNotes => "notes-list",
            Label::AddNote => "add-note",
            Label::EnterTitle => "enter-title",
            Label::EnterNote => "enter-note",
            Label::Saved => "success",
            Label::NoNotes => "no-notes",
            Label::Back => "back",
            Label::Delete => "delete",
            Label::Cancel => "cancel",
            Label::Failure => "failure",
        }
    }

    fn english(self) -> &'static str {
        match self {
            Label::MenuText => "Select a command",
            Label::ListNotes => "My notes",
            Label::AddNote => "Add note",
            Label::EnterTitle => "Enter the note title",
            Label::EnterNote => "Enter the note text",
            Label::Saved => "Note saved",
            Label::NoNotes => "You have no notes yet",
            Label::Back => "Back",
            Label::Delete => "Delete",
            Label::Cancel => "Cancel",
            Label::Failure => "Something went wrong, please try again",
        }
    }
}

/// Lookup of display strings by key
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;

    fn label(&self, label: Label) -> String {
        self.translate(label.key())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read locale file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid locale file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Locale file must be a JSON object of strings")]
    NotAnObject,
}

/// In-memory translation table
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Built-in English strings
    pub fn english() -> Self {
        let entries = Label::ALL
            .iter()
            .map(|label| (label.key().to_string(), label.english().to_string()))
            .collect();
        Self { entries }
    }

    /// English strings overridden by the entries of a JSON object file
    ///
    /// Non-string values are skipped.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let Value::Object(map) = serde_json::from_str::<Value>(&raw)? else {
            return Err(CatalogError::NotAnObject);
        };

        let mut catalog = Self::english();
        for (key, value) in map {
            if let Value::String(text) = value {
                catalog.entries.insert(key, text);
            } else {
                tracing::warn!(key = %key, "Skipping non-string locale entry");
            }
        }
        Ok(catalog)
    }
}

impl Translator for Catalog {
    /// Unknown keys translate to themselves
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}
