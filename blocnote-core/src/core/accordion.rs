//! Accordion payload: a collapsible heading that owns nested blocks.

use crate::core::block::{sort_by_order, Block};
use crate::RichTextValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccordionData {
    pub heading: RichTextValue,
    pub is_expanded: bool,
    pub level: HeadingLevel,
    /// Blocks exclusively owned by this accordion; dropped with it.
    pub content_blocks: Vec<Block>,
}

impl AccordionData {
    pub fn new(heading: impl Into<RichTextValue>, level: HeadingLevel) -> Self {
        Self {
            heading: heading.into(),
            is_expanded: true,
            level,
            content_blocks: Vec::new(),
        }
    }

    /// Owned blocks in display order.
    pub fn sorted_blocks(&self) -> Vec<&Block> {
        sort_by_order(&self.content_blocks)
    }

    pub fn next_order_index(&self) -> i32 {
        self.content_blocks
            .iter()
            .map(|b| b.order_index + 1)
            .max()
            .unwrap_or(0)
    }
}
