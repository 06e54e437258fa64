//! The note aggregate: metadata plus an owned forest of blocks.

use crate::core::block::{sort_by_order, Block, BlockPayload};
use crate::core::clone::clone_block;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a note sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteStatus {
    /// Persisted and visible in the main list.
    Saved,
    /// Freshly composed, not yet saved by the user.
    Temp,
    /// In the trash, awaiting restore or purge.
    Deleted,
}

impl NoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Temp => "temp",
            Self::Deleted => "deleted",
        }
    }

    /// Parses a stored status string; unknown values read as `Saved`.
    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "saved" => Self::Saved,
            "temp" => Self::Temp,
            "deleted" => Self::Deleted,
            other => {
                log::warn!("unknown note status '{other}', treating as saved");
                Self::Saved
            }
        }
    }
}

/// A user-defined note category. A note belongs to at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}

/// One note: metadata plus the ordered top-level blocks it owns.
///
/// Invariant: `moved_to_deleted_at` is set if and only if `status` is
/// [`NoteStatus::Deleted`]. Stored rows that violate it are repaired on
/// read by [`Note::repair_invariants`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub status: NoteStatus,
    pub moved_to_deleted_at: Option<i64>,
    pub is_pinned: bool,
    pub category: Option<Category>,
    pub tags: Vec<String>,
    /// Top-level blocks; display order is `order_index`, not Vec order.
    pub blocks: Vec<Block>,
}

impl Note {
    /// Creates an empty, unsaved note stamped with the current time.
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            created_at: now,
            updated_at: now,
            status: NoteStatus::Temp,
            moved_to_deleted_at: None,
            is_pinned: false,
            category: None,
            tags: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Restores the deleted/timestamp pairing when a stored row violates
    /// it. Returns whether anything was changed so callers can persist
    /// the fix on their next save.
    pub fn repair_invariants(&mut self) -> bool {
        match (self.status, self.moved_to_deleted_at) {
            (NoteStatus::Deleted, None) => {
                log::warn!("note {} deleted without timestamp, backfilling", self.id);
                self.moved_to_deleted_at = Some(self.updated_at);
                true
            }
            (NoteStatus::Saved | NoteStatus::Temp, Some(_)) => {
                log::warn!("note {} has deletion timestamp but is not deleted", self.id);
                self.moved_to_deleted_at = None;
                true
            }
            _ => false,
        }
    }

    /// Moves the note to the trash, stamping the deletion time.
    pub fn mark_deleted(&mut self, now: i64) {
        self.status = NoteStatus::Deleted;
        self.moved_to_deleted_at = Some(now);
    }

    /// Brings the note back from the trash.
    pub fn restore(&mut self) {
        self.status = NoteStatus::Saved;
        self.moved_to_deleted_at = None;
    }

    /// The next free top-level order index.
    pub fn next_order_index(&self) -> i32 {
        self.blocks.iter().map(|b| b.order_index + 1).max().unwrap_or(0)
    }

    /// Top-level blocks in display order.
    pub fn sorted_blocks(&self) -> Vec<&Block> {
        sort_by_order(&self.blocks)
    }

    /// Appends a new top-level block holding `payload` and returns it.
    pub fn append_block(&mut self, payload: BlockPayload) -> &Block {
        let block = Block::new(payload, self.next_order_index());
        self.blocks.push(block);
        self.blocks.last().unwrap()
    }

    /// Inserts an already-built top-level block, keeping its order index.
    pub fn insert_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Finds a block anywhere in the tree, recursing through accordions
    /// and columns.
    pub fn block(&self, id: &str) -> Option<&Block> {
        find_in(&self.blocks, id)
    }

    pub fn block_mut(&mut self, id: &str) -> Option<&mut Block> {
        find_in_mut(&mut self.blocks, id)
    }

    /// Removes the block with `id` wherever it sits in the tree.
    ///
    /// Ownership makes this a cascade: everything the block owns —
    /// nested accordion content, column content, cells, items — is
    /// dropped with it. Returns whether a block was removed.
    pub fn remove_block(&mut self, id: &str) -> bool {
        remove_in(&mut self.blocks, id)
    }

    /// Duplicates the block with `id` next to itself: the copy gets
    /// `order_index + 1` and later siblings shift up by one. Returns the
    /// new block's id, or `None` when `id` is not in the tree.
    pub fn duplicate_block(&mut self, id: &str) -> Option<String> {
        duplicate_in(&mut self.blocks, id)
    }
}

fn find_in<'a>(blocks: &'a [Block], id: &str) -> Option<&'a Block> {
    for block in blocks {
        if block.id == id {
            return Some(block);
        }
        match &block.payload {
            BlockPayload::Accordion(a) => {
                if let Some(found) = find_in(&a.content_blocks, id) {
                    return Some(found);
                }
            }
            BlockPayload::Columns(c) => {
                for column in &c.columns {
                    if let Some(found) = find_in(&column.blocks, id) {
                        return Some(found);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn find_in_mut<'a>(blocks: &'a mut [Block], id: &str) -> Option<&'a mut Block> {
    for block in blocks {
        if block.id == id {
            return Some(block);
        }
        match &mut block.payload {
            BlockPayload::Accordion(a) => {
                if let Some(found) = find_in_mut(&mut a.content_blocks, id) {
                    return Some(found);
                }
            }
            BlockPayload::Columns(c) => {
                for column in &mut c.columns {
                    if let Some(found) = find_in_mut(&mut column.blocks, id) {
                        return Some(found);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn remove_in(blocks: &mut Vec<Block>, id: &str) -> bool {
    if let Some(pos) = blocks.iter().position(|b| b.id == id) {
        blocks.remove(pos);
        return true;
    }
    for block in blocks {
        match &mut block.payload {
            BlockPayload::Accordion(a) => {
                if remove_in(&mut a.content_blocks, id) {
                    return true;
                }
            }
            BlockPayload::Columns(c) => {
                for column in &mut c.columns {
                    if remove_in(&mut column.blocks, id) {
                        return true;
                    }
                }
            }
            _ => {}
        }
    }
    false
}

fn duplicate_in(blocks: &mut Vec<Block>, id: &str) -> Option<String> {
    if let Some(pos) = blocks.iter().position(|b| b.id == id) {
        let source_order = blocks[pos].order_index;
        let clone = clone_block(&blocks[pos], source_order + 1);
        let new_id = clone.id.clone();
        // Open a gap so the copy lands directly after its source.
        for sibling in blocks.iter_mut() {
            if sibling.order_index > source_order {
                sibling.order_index += 1;
            }
        }
        blocks.push(clone);
        return Some(new_id);
    }
    for block in blocks {
        match &mut block.payload {
            BlockPayload::Accordion(a) => {
                if let Some(new_id) = duplicate_in(&mut a.content_blocks, id) {
                    return Some(new_id);
                }
            }
            BlockPayload::Columns(c) => {
                for column in &mut c.columns {
                    if let Some(new_id) = duplicate_in(&mut column.blocks, id) {
                        return Some(new_id);
                    }
                }
            }
            _ => {}
        }
    }
    None
}
