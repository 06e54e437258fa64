//! Multi-column layout payload.

use crate::core::block::{sort_by_order, Block, ParentRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One column of a Columns block. Sibling columns are ordered by
/// `order_index`, independent of the owning block's own position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub order_index: i32,
    /// Fraction of the owning block's width taken by this column.
    pub width_ratio: f64,
    /// Blocks exclusively owned by this column; dropped with it.
    pub blocks: Vec<Block>,
}

impl Column {
    pub fn new(width_ratio: f64, order_index: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            order_index,
            width_ratio,
            blocks: Vec::new(),
        }
    }

    /// Appends `block` to this column, taking ownership and pointing its
    /// back-reference here.
    pub fn push_block(&mut self, mut block: Block) {
        block.parent = Some(ParentRef::Column(self.id.clone()));
        self.blocks.push(block);
    }

    pub fn sorted_blocks(&self) -> Vec<&Block> {
        sort_by_order(&self.blocks)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnData {
    pub columns: Vec<Column>,
}

impl ColumnData {
    /// Creates `count` equal-width columns (at least one).
    pub fn new(count: usize) -> Self {
        let count = count.max(1);
        let ratio = 1.0 / count as f64;
        let columns = (0..count).map(|i| Column::new(ratio, i as i32)).collect();
        Self { columns }
    }

    /// Columns in display order (ascending `order_index`, ties by id).
    pub fn sorted_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.iter().collect();
        columns.sort_by(|a, b| a.order_index.cmp(&b.order_index).then_with(|| a.id.cmp(&b.id)));
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::block::{Block, BlockPayload, TextData};

    #[test]
    fn test_new_splits_width_evenly() {
        let data = ColumnData::new(4);
        assert_eq!(data.columns.len(), 4);
        for col in &data.columns {
            assert!((col.width_ratio - 0.25).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_push_block_sets_back_reference() {
        let mut col = Column::new(0.5, 0);
        col.push_block(Block::new(
            BlockPayload::Text(TextData::from("inside")),
            0,
        ));
        match &col.blocks[0].parent {
            Some(ParentRef::Column(id)) => assert_eq!(id, &col.id),
            other => panic!("expected column back-reference, got {other:?}"),
        }
    }

    #[test]
    fn test_sorted_columns_by_order_index() {
        let mut data = ColumnData::new(2);
        data.columns[0].order_index = 5;
        data.columns[1].order_index = 1;
        let ids: Vec<&str> = data.sorted_columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids[0], data.columns[1].id);
    }
}
