//! Note repository implementation

use crate::error::{Error, Result};
use crate::models::{Note, NoteId, NoteInput};
use libsql::{params, Connection, Row};

/// Trait for note storage operations (async)
///
/// Implementations store whatever they are given; validation happens before
/// a submission reaches the repository.
#[allow(async_fn_in_trait)]
pub trait NoteRepository {
    /// Create a new note
    async fn create(&self, input: &NoteInput) -> Result<Note>;

    /// Get a note by ID
    async fn get(&self, id: &NoteId) -> Result<Option<Note>>;

    /// List all notes, newest first
    async fn list(&self) -> Result<Vec<Note>>;

    /// Replace a note's title and details
    async fn update(&self, id: &NoteId, input: &NoteInput) -> Result<Note>;

    /// Permanently delete a note
    async fn delete(&self, id: &NoteId) -> Result<()>;
}

/// libSQL implementation of `NoteRepository`
pub struct LibSqlNoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlNoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a note from a database row
    fn parse_note(row: &Row) -> Result<Note> {
        let id: String = row.get(0)?;
        Ok(Note {
            id: id
                .parse()
                .map_err(|_| Error::Database(format!("Malformed note id in database: {id}")))?,
            title: row.get(1)?,
            details: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

impl NoteRepository for LibSqlNoteRepository<'_> {
    async fn create(&self, input: &NoteInput) -> Result<Note> {
        let note = Note::new(input);

        self.conn
            .execute(
                "INSERT INTO notes (id, title, details, created_at) VALUES (?, ?, ?, ?)",
                params![
                    note.id.as_str(),
                    note.title.as_str(),
                    note.details.as_str(),
                    note.created_at
                ],
            )
            .await?;

        Ok(note)
    }

    async fn get(&self, id: &NoteId) -> Result<Option<Note>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, title, details, created_at FROM notes WHERE id = ?",
                params![id.as_str()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(Self::parse_note(&row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Note>> {
        // rowid breaks ties between notes created in the same millisecond
        let mut rows = self
            .conn
            .query(
                "SELECT id, title, details, created_at
                 FROM notes
                 ORDER BY created_at DESC, rowid DESC",
                (),
            )
            .await?;

        let mut notes = Vec::new();
        while let Some(row) = rows.next().await? {
            notes.push(Self::parse_note(&row)?);
        }

        Ok(notes)
    }

    async fn update(&self, id: &NoteId, input: &NoteInput) -> Result<Note> {
        let rows = self
            .conn
            .execute(
                "UPDATE notes SET title = ?, details = ? WHERE id = ?",
                params![input.title.as_str(), input.details.as_str(), id.as_str()],
            )
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        self.get(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &NoteId) -> Result<()> {
        let rows = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?", params![id.as_str()])
            .await?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        Ok(())
    }
}
