//! Internal domain modules for the Blocnote core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod accordion;
pub mod block;
pub mod clone;
pub mod column;
pub mod error;
pub mod extract;
pub mod list;
pub mod note;
pub mod rich_text;
pub mod storage;
pub mod table;
pub mod undo;
pub mod workspace;

#[doc(inline)]
pub use accordion::{AccordionData, HeadingLevel};
#[doc(inline)]
pub use block::{
    Block, BlockKind, BlockPayload, BookmarkData, BookmarkMetadata, CodeData, FileMetadata,
    FilePathData, ImageData, ParentRef, QuoteData, ReminderData, TextData,
};
#[doc(inline)]
pub use clone::clone_block;
#[doc(inline)]
pub use column::{Column, ColumnData};
#[doc(inline)]
pub use error::{BlocnoteError, Result};
#[doc(inline)]
pub use extract::{block_search_text, note_matches, note_search_text};
#[doc(inline)]
pub use list::{ListData, ListItem, ListKind};
#[doc(inline)]
pub use note::{Category, Note, NoteStatus};
#[doc(inline)]
pub use rich_text::RichTextValue;
#[doc(inline)]
pub use storage::Storage;
#[doc(inline)]
pub use table::{TableCell, TableGrid};
#[doc(inline)]
pub use undo::{UndoManager, UNDO_CAPACITY};
#[doc(inline)]
pub use workspace::Workspace;
