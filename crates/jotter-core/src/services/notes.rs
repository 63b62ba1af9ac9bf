//! Shared note service used by the web frontend.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::db::{Database, LibSqlNoteRepository, NoteRepository, IN_MEMORY};
use crate::models::{Note, NoteInput};
use crate::{Error, NoteId, Result};

/// Thread-safe service for note storage operations.
#[derive(Clone)]
pub struct NoteService {
    db: Arc<Mutex<Database>>,
    db_path: Option<PathBuf>,
}

impl NoteService {
    /// Open a note service backed by the database at the given path.
    ///
    /// Parent directories are created as needed. The special path `:memory:`
    /// opens an in-memory database.
    pub async fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if db_path.as_os_str() == IN_MEMORY {
            return Self::open_in_memory().await;
        }

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&db_path).await?;
        tracing::info!("Opened note database at {}", db_path.display());
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: Some(db_path),
        })
    }

    /// Open an in-memory note service (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        tracing::info!("Running with an in-memory note database");
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
            db_path: None,
        })
    }

    /// Filesystem path of the backing database, if any.
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// List notes newest-first.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let db = self.db.lock().await;
        let repo = LibSqlNoteRepository::new(db.connection());
        repo.list().await
    }

    /// Fetch a note by id.
    pub async fn get_note(&self, id: &NoteId) -> Result<Option<Note>> {
        let db = self.db.lock().await;
        let repo = LibSqlNoteRepository::new(db.connection());
        repo.get(id).await
    }

    /// Create a new note.
    pub async fn create_note(&self, input: &NoteInput) -> Result<Note> {
        ensure_valid(input)?;
        let db = self.db.lock().await;
        let repo = LibSqlNoteRepository::new(db.connection());
        repo.create(input).await
    }

    /// Update a note's title and details.
    pub async fn update_note(&self, id: &NoteId, input: &NoteInput) -> Result<Note> {
        ensure_valid(input)?;
        let db = self.db.lock().await;
        let repo = LibSqlNoteRepository::new(db.connection());
        repo.update(id, input).await
    }

    /// Delete a note.
    pub async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let db = self.db.lock().await;
        let repo = LibSqlNoteRepository::new(db.connection());
        repo.delete(id).await
    }
}

fn ensure_valid(input: &NoteInput) -> Result<()> {
    let errors = input.validate();
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    Err(Error::InvalidInput(messages.join("; ")))
}
