//! High-level persistence operations over a Blocnote SQLite database.
//!
//! The in-memory model (`Note`, `Block` and friends) knows nothing about
//! storage; `Workspace` is the collaborator that moves whole notes across
//! the transactional boundary. A note's block tree travels as one JSON
//! blob, so the tree's exclusive-ownership rule doubles as the cascade
//! rule here: deleting a row removes everything the note owned.

use crate::core::extract::note_matches;
use crate::{BlocnoteError, Note, NoteStatus, Result, Storage};
use rusqlite::Row;
use std::path::Path;

/// Seconds in one day; converts trash retention days to a cutoff.
const SECONDS_PER_DAY: i64 = 86_400;

/// An open Blocnote workspace backed by a SQLite database.
///
/// Each instance is single-owner; the desktop shell keeps one per window
/// behind a `Mutex`. All mutations take `&mut self` and either commit
/// fully or leave the database unchanged.
pub struct Workspace {
    storage: Storage,
}

impl Workspace {
    /// Creates a new workspace database at `path` and initialises the schema.
    ///
    /// # Errors
    ///
    /// Returns [`BlocnoteError::Database`] for any SQLite failure.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::create(path)?;
        let now = chrono::Utc::now().timestamp();
        storage.connection().execute(
            "INSERT OR REPLACE INTO workspace_meta (key, value) VALUES ('created_at', ?)",
            [now.to_string()],
        )?;
        Ok(Self { storage })
    }

    /// Opens an existing workspace database.
    ///
    /// # Errors
    ///
    /// Returns [`BlocnoteError::InvalidWorkspace`] when the file is not a
    /// Blocnote database, or [`BlocnoteError::Database`] for SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let storage = Storage::open(path)?;
        Ok(Self { storage })
    }

    /// Creates and persists a new empty note, returning it with
    /// [`NoteStatus::Temp`] — the first explicit save promotes it.
    pub fn insert_note(&mut self, title: &str) -> Result<Note> {
        let note = Note::new(title);
        self.write_note(&note)?;
        Ok(note)
    }

    /// Loads the note with `id`, repairing the deleted/timestamp
    /// invariant in the returned value if the stored row violates it
    /// (the fix reaches the database on the next save).
    ///
    /// # Errors
    ///
    /// Returns [`BlocnoteError::NoteNotFound`] for unknown ids.
    pub fn get_note(&self, id: &str) -> Result<Note> {
        let mut note = self
            .storage
            .connection()
            .query_row(
                "SELECT id, title, created_at, updated_at, status, moved_to_deleted_at,
                        is_pinned, category_json, tags_json, blocks_json
                 FROM notes WHERE id = ?1",
                [id],
                note_from_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => {
                    BlocnoteError::NoteNotFound(id.to_string())
                }
                other => BlocnoteError::Database(other),
            })??;
        note.repair_invariants();
        Ok(note)
    }

    /// Persists `note`, refreshing `updated_at` and promoting a
    /// [`NoteStatus::Temp`] note to [`NoteStatus::Saved`].
    ///
    /// The caller must hand over a structurally valid tree; every public
    /// mutation on the model maintains that, so any quiescent note is
    /// safe to save.
    pub fn save_note(&mut self, note: &mut Note) -> Result<()> {
        note.updated_at = chrono::Utc::now().timestamp();
        if note.status == NoteStatus::Temp {
            note.status = NoteStatus::Saved;
        }
        note.repair_invariants();
        self.write_note(note)
    }

    /// All notes with `status`, pinned first, most recently updated next.
    pub fn list_notes(&self, status: NoteStatus) -> Result<Vec<Note>> {
        let mut stmt = self.storage.connection().prepare(
            "SELECT id, title, created_at, updated_at, status, moved_to_deleted_at,
                    is_pinned, category_json, tags_json, blocks_json
             FROM notes WHERE status = ?1
             ORDER BY is_pinned DESC, updated_at DESC",
        )?;
        let notes = stmt
            .query_map([status.as_str()], note_from_row)?
            .collect::<rusqlite::Result<Vec<Result<Note>>>>()?
            .into_iter()
            .collect::<Result<Vec<Note>>>()?;
        Ok(notes
            .into_iter()
            .map(|mut n| {
                n.repair_invariants();
                n
            })
            .collect())
    }

    /// Moves the note to the trash (soft delete).
    pub fn move_to_trash(&mut self, id: &str) -> Result<()> {
        let mut note = self.get_note(id)?;
        note.mark_deleted(chrono::Utc::now().timestamp());
        self.write_note(&note)
    }

    /// Brings a trashed note back into the main list.
    pub fn restore_from_trash(&mut self, id: &str) -> Result<()> {
        let mut note = self.get_note(id)?;
        note.restore();
        self.write_note(&note)
    }

    /// Permanently deletes the note. The row owns the serialized block
    /// tree, so removal cascades over everything the note owned.
    ///
    /// # Errors
    ///
    /// Returns [`BlocnoteError::NoteNotFound`] when no row was deleted.
    pub fn delete_note(&mut self, id: &str) -> Result<()> {
        let tx = self.storage.connection_mut().transaction()?;
        tx.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        if tx.changes() == 0 {
            return Err(BlocnoteError::NoteNotFound(id.to_string()));
        }
        tx.commit()?;
        Ok(())
    }

    /// Hard-deletes trashed notes whose deletion timestamp is older than
    /// `retention_days`. Returns how many notes were purged.
    pub fn purge_trash(&mut self, retention_days: u32) -> Result<usize> {
        let cutoff =
            chrono::Utc::now().timestamp() - (retention_days as i64 * SECONDS_PER_DAY);
        let tx = self.storage.connection_mut().transaction()?;
        let purged = tx.execute(
            "DELETE FROM notes WHERE status = 'deleted' AND moved_to_deleted_at < ?1",
            [cutoff],
        )?;
        tx.commit()?;
        Ok(purged)
    }

    pub fn set_pinned(&mut self, id: &str, pinned: bool) -> Result<()> {
        let affected = self.storage.connection().execute(
            "UPDATE notes SET is_pinned = ?1 WHERE id = ?2",
            rusqlite::params![pinned, id],
        )?;
        if affected == 0 {
            return Err(BlocnoteError::NoteNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Case-insensitive substring search over saved notes; trashed and
    /// unsaved notes are excluded. The match runs against the full
    /// extracted text of each note — title, category, tags and every
    /// block, nested content included.
    pub fn search_notes(&self, query: &str) -> Result<Vec<Note>> {
        let candidates = self.list_notes(NoteStatus::Saved)?;
        Ok(candidates
            .into_iter()
            .filter(|note| note_matches(note, query))
            .collect())
    }

    fn write_note(&mut self, note: &Note) -> Result<()> {
        let category_json = note
            .category
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let tags_json = serde_json::to_string(&note.tags)?;
        let blocks_json = serde_json::to_string(&note.blocks)?;

        self.storage.connection().execute(
            "INSERT INTO notes (id, title, created_at, updated_at, status, moved_to_deleted_at,
                                is_pinned, category_json, tags_json, blocks_json)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                updated_at = excluded.updated_at,
                status = excluded.status,
                moved_to_deleted_at = excluded.moved_to_deleted_at,
                is_pinned = excluded.is_pinned,
                category_json = excluded.category_json,
                tags_json = excluded.tags_json,
                blocks_json = excluded.blocks_json",
            rusqlite::params![
                note.id,
                note.title,
                note.created_at,
                note.updated_at,
                note.status.as_str(),
                note.moved_to_deleted_at,
                note.is_pinned,
                category_json,
                tags_json,
                blocks_json,
            ],
        )?;
        Ok(())
    }
}

/// Maps one `notes` row to a [`Note`]. JSON decode failures surface as
/// [`BlocnoteError::Json`] in the outer `Result`; the status string is
/// parsed lossily so rows written by newer versions still load.
fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Result<Note>> {
    let status: String = row.get(4)?;
    let category_json: Option<String> = row.get(7)?;
    let tags_json: String = row.get(8)?;
    let blocks_json: String = row.get(9)?;

    let decoded = (|| -> Result<Note> {
        Ok(Note {
            id: row.get(0)?,
            title: row.get(1)?,
            created_at: row.get(2)?,
            updated_at: row.get(3)?,
            status: NoteStatus::parse_lossy(&status),
            moved_to_deleted_at: row.get(5)?,
            is_pinned: row.get(6)?,
            category: category_json
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            tags: serde_json::from_str(&tags_json)?,
            blocks: serde_json::from_str(&blocks_json)?,
        })
    })();
    Ok(decoded)
}
