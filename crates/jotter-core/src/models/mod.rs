//! Data models for Jotter

mod note;

pub use note::{FieldError, Note, NoteId, NoteInput};
