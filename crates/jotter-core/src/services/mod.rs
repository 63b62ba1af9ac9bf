//! Async services shared by frontends

mod notes;

pub use notes::NoteService;
