//! Note model and submission validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::util::unix_timestamp_millis_now;

/// A unique identifier for a note, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A note in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Short heading
    pub title: String,
    /// Body text
    pub details: String,
    /// Creation timestamp (Unix ms), the default sort key
    pub created_at: i64,
}

impl Note {
    /// Create a new note from a submission, stamping id and creation time
    #[must_use]
    pub fn new(input: &NoteInput) -> Self {
        Self {
            id: NoteId::new(),
            title: input.title.clone(),
            details: input.details.clone(),
            created_at: unix_timestamp_millis_now(),
        }
    }
}

/// A create or update submission, as posted by the note forms.
///
/// Fields missing from the form body deserialize as empty strings so that
/// validation, not extraction, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub details: String,
}

/// A required field that was left blank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    MissingTitle,
    MissingDetails,
}

impl FieldError {
    /// Message shown next to the form
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingTitle => "Please fill out the title",
            Self::MissingDetails => "Please fill out the details",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for FieldError {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

impl NoteInput {
    /// Create a submission from raw field values
    #[must_use]
    pub fn new(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: details.into(),
        }
    }

    /// Check required fields, reporting every blank one in field order.
    ///
    /// Whitespace-only values count as blank.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::MissingTitle);
        }
        if self.details.trim().is_empty() {
            errors.push(FieldError::MissingDetails);
        }
        errors
    }
}
