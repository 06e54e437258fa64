//! Error types for the Blocnote core library.

use thiserror::Error;

/// All errors that can occur within the Blocnote core library.
///
/// The in-memory document model is deliberately total: grid guards,
/// missing size-array entries and unknown variant tags all resolve to
/// documented fallbacks instead of errors. Hard failures only exist at
/// the persistence boundary.
#[derive(Debug, Error)]
pub enum BlocnoteError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A note ID was requested that does not exist in the database.
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    /// The opened file is not a valid Blocnote workspace.
    #[error("Invalid workspace: {0}")]
    InvalidWorkspace(String),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored note data could not be deserialized from JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias that pins the error type to [`BlocnoteError`].
pub type Result<T> = std::result::Result<T, BlocnoteError>;

impl BlocnoteError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::InvalidWorkspace(_) => "Could not open workspace file".to_string(),
            Self::Io(e) => format!("File error: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
        }
    }
}
