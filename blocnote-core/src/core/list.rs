//! List payload: bullet, numbered and checkbox lists.

use crate::RichTextValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListKind {
    Bullet,
    Numbered,
    Checkbox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub order_index: i32,
    pub text: RichTextValue,
    /// Only meaningful for [`ListKind::Checkbox`] lists; kept `false` otherwise.
    pub is_checked: bool,
}

impl ListItem {
    pub fn new(text: impl Into<RichTextValue>, order_index: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            order_index,
            text: text.into(),
            is_checked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListData {
    pub kind: ListKind,
    pub title: String,
    pub items: Vec<ListItem>,
}

impl ListData {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            title: String::new(),
            items: Vec::new(),
        }
    }

    /// Appends an item after the current last item.
    pub fn push_item(&mut self, text: impl Into<RichTextValue>) -> &ListItem {
        let next = self.items.iter().map(|i| i.order_index + 1).max().unwrap_or(0);
        self.items.push(ListItem::new(text, next));
        self.items.last().unwrap()
    }

    /// Items in display order (ascending `order_index`, ties by id).
    pub fn sorted_items(&self) -> Vec<&ListItem> {
        let mut items: Vec<&ListItem> = self.items.iter().collect();
        items.sort_by(|a, b| a.order_index.cmp(&b.order_index).then_with(|| a.id.cmp(&b.id)));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_item_assigns_ascending_order() {
        let mut list = ListData::new(ListKind::Bullet);
        list.push_item("a");
        list.push_item("b");
        let orders: Vec<i32> = list.sorted_items().iter().map(|i| i.order_index).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn test_sorted_items_after_sparse_deletion() {
        let mut list = ListData::new(ListKind::Checkbox);
        list.push_item("a");
        list.push_item("b");
        list.push_item("c");
        list.items.remove(1);
        // order_index stays sparse; display order is still deterministic
        let texts: Vec<&str> = list
            .sorted_items()
            .iter()
            .map(|i| i.text.plain_text())
            .collect();
        assert_eq!(texts, vec!["a", "c"]);
    }
}
