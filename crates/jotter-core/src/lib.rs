//! jotter-core - Core library for Jotter
//!
//! This crate contains the note model, submission validation, the database
//! layer, and the async service the web frontend talks to.

pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod util;

pub use error::{Error, Result};
pub use models::{FieldError, Note, NoteId, NoteInput};
pub use services::NoteService;
