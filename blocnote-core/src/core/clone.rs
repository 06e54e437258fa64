//! Recursive deep copy of a block and everything it owns.
//!
//! Used by the duplicate action. The copy gets fresh identities at every
//! level — block, table cell, list item, column — and shares no mutable
//! storage with the source: mutating either side afterwards never affects
//! the other. Nested back-references are re-pointed at the new container
//! ids so the clone is internally consistent.

use crate::core::accordion::AccordionData;
use crate::core::block::{Block, BlockPayload, ParentRef};
use crate::core::column::{Column, ColumnData};
use crate::core::list::{ListData, ListItem};
use crate::core::table::TableGrid;
use uuid::Uuid;

/// Clones `source` and its whole subtree.
///
/// The new block's `order_index` is caller-assigned — the clone does not
/// presume a target position. Its back-reference is copied from the
/// source (a duplicate lands in the same container); callers moving the
/// clone elsewhere re-target `parent` themselves.
pub fn clone_block(source: &Block, order_index: i32) -> Block {
    let id = Uuid::new_v4().to_string();
    let payload = clone_payload(&source.payload, &id);
    Block {
        id,
        order_index,
        payload,
        parent: source.parent.clone(),
    }
}

/// Dispatches on the variant tag; `owner_id` is the id of the new block
/// that will own the payload, needed to re-parent accordion children.
fn clone_payload(payload: &BlockPayload, owner_id: &str) -> BlockPayload {
    match payload {
        // Leaf payloads carry only scalar/opaque fields; a value copy is a
        // complete deep copy.
        BlockPayload::Text(d) => BlockPayload::Text(d.clone()),
        BlockPayload::Quote(d) => BlockPayload::Quote(d.clone()),
        BlockPayload::Code(d) => BlockPayload::Code(d.clone()),
        BlockPayload::Image(d) => BlockPayload::Image(d.clone()),
        BlockPayload::Bookmark(d) => BlockPayload::Bookmark(d.clone()),
        BlockPayload::FilePath(d) => BlockPayload::FilePath(d.clone()),
        BlockPayload::Reminder(d) => BlockPayload::Reminder(d.clone()),
        BlockPayload::Table(grid) => BlockPayload::Table(clone_grid(grid)),
        BlockPayload::List(list) => BlockPayload::List(clone_list(list)),
        BlockPayload::Accordion(accordion) => {
            BlockPayload::Accordion(clone_accordion(accordion, owner_id))
        }
        BlockPayload::Columns(columns) => BlockPayload::Columns(clone_columns(columns)),
    }
}

fn clone_grid(grid: &TableGrid) -> TableGrid {
    let mut copy = grid.clone();
    for cell in copy.cells_mut() {
        cell.id = Uuid::new_v4().to_string();
    }
    copy
}

fn clone_list(list: &ListData) -> ListData {
    ListData {
        kind: list.kind,
        title: list.title.clone(),
        items: list
            .items
            .iter()
            .map(|item| ListItem {
                id: Uuid::new_v4().to_string(),
                order_index: item.order_index,
                text: item.text.clone(),
                is_checked: item.is_checked,
            })
            .collect(),
    }
}

fn clone_accordion(accordion: &AccordionData, owner_id: &str) -> AccordionData {
    let mut content_blocks = Vec::with_capacity(accordion.content_blocks.len());
    for child in accordion.sorted_blocks() {
        let mut clone = clone_block(child, child.order_index);
        clone.parent = Some(ParentRef::Accordion(owner_id.to_string()));
        content_blocks.push(clone);
    }
    AccordionData {
        heading: accordion.heading.clone(),
        is_expanded: accordion.is_expanded,
        level: accordion.level,
        content_blocks,
    }
}

fn clone_columns(data: &ColumnData) -> ColumnData {
    let mut columns = Vec::with_capacity(data.columns.len());
    for column in data.sorted_columns() {
        let id = Uuid::new_v4().to_string();
        let mut blocks = Vec::with_capacity(column.blocks.len());
        for child in column.sorted_blocks() {
            let mut clone = clone_block(child, child.order_index);
            clone.parent = Some(ParentRef::Column(id.clone()));
            blocks.push(clone);
        }
        columns.push(Column {
            id,
            order_index: column.order_index,
            width_ratio: column.width_ratio,
            blocks,
        });
    }
    ColumnData { columns }
}
