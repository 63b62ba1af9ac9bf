//! Database layer for Jotter

mod connection;
mod migrations;
mod repository;

pub use connection::{Database, IN_MEMORY};
pub use repository::{LibSqlNoteRepository, NoteRepository};
