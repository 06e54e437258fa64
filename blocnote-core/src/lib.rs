//! Core library for Blocnote — a block-based note-taking application.
//!
//! A note is a forest of [`Block`]s, each carrying exactly one content
//! payload (text, table, accordion, code, image, columns, list, quote,
//! bookmark, file link or reminder). Accordions and columns nest
//! arbitrarily; everything else is a leaf. On top of the tree sit the
//! table grid engine ([`TableGrid`]), recursive duplication
//! ([`clone_block`]), recursive text extraction for search
//! ([`note_search_text`]) and a bounded undo history ([`UndoManager`]).
//!
//! Persistence goes through [`Workspace`], which moves whole notes across
//! a SQLite boundary; the model itself performs no I/O.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    accordion::{AccordionData, HeadingLevel},
    block::{
        Block, BlockKind, BlockPayload, BookmarkData, BookmarkMetadata, CodeData, FileMetadata,
        FilePathData, ImageData, ParentRef, QuoteData, ReminderData, TextData,
    },
    clone::clone_block,
    column::{Column, ColumnData},
    error::{BlocnoteError, Result},
    extract::{block_search_text, note_matches, note_search_text},
    list::{ListData, ListItem, ListKind},
    note::{Category, Note, NoteStatus},
    rich_text::RichTextValue,
    storage::Storage,
    table::{
        TableCell, TableGrid, DEFAULT_COLUMN_WIDTH, DEFAULT_ROW_HEIGHT, MIN_COLUMN_WIDTH,
        MIN_ROW_HEIGHT,
    },
    undo::{UndoManager, UNDO_CAPACITY},
    workspace::Workspace,
};
