//! Recursive flattening of a note into one search string.
//!
//! Search is case-insensitive substring containment against a single
//! string built from the note's title, category, tags and every block's
//! text, in that order. Extraction walks siblings in ascending
//! `order_index` at every level so the result is deterministic and the
//! same tree always flattens to the same string.

use crate::core::block::{Block, BlockPayload};
use crate::core::note::Note;

/// Builds the full search string for `note`.
///
/// Fragments are joined with single spaces; empty fragments are skipped
/// so the output never contains runs of whitespace.
pub fn note_search_text(note: &Note) -> String {
    let mut parts: Vec<String> = Vec::new();
    push_fragment(&mut parts, &note.title);
    if let Some(category) = &note.category {
        push_fragment(&mut parts, &category.name);
    }
    for tag in &note.tags {
        push_fragment(&mut parts, tag);
    }
    for block in note.sorted_blocks() {
        block_search_text(block, &mut parts);
    }
    parts.join(" ")
}

/// Appends `block`'s text fragments to `out`, recursing through
/// accordions and columns in display order.
pub fn block_search_text(block: &Block, out: &mut Vec<String>) {
    match &block.payload {
        BlockPayload::Text(d) => push_fragment(out, d.content.plain_text()),
        BlockPayload::Quote(d) => push_fragment(out, d.content.plain_text()),
        BlockPayload::Code(d) => push_fragment(out, &d.source),
        // Images carry no searchable text.
        BlockPayload::Image(_) => {}
        BlockPayload::Table(grid) => {
            push_fragment(out, &grid.title);
            // Row-major: any fixed order keeps extraction reproducible.
            let mut cells: Vec<_> = grid.cells().iter().collect();
            cells.sort_by_key(|c| (c.row, c.column));
            for cell in cells {
                push_fragment(out, cell.content.plain_text());
            }
        }
        BlockPayload::List(list) => {
            push_fragment(out, &list.title);
            for item in list.sorted_items() {
                push_fragment(out, item.text.plain_text());
            }
        }
        BlockPayload::Accordion(accordion) => {
            push_fragment(out, accordion.heading.plain_text());
            for child in accordion.sorted_blocks() {
                block_search_text(child, out);
            }
        }
        BlockPayload::Columns(data) => {
            for column in data.sorted_columns() {
                for child in column.sorted_blocks() {
                    block_search_text(child, out);
                }
            }
        }
        BlockPayload::Bookmark(d) => {
            push_fragment(out, &d.title);
            push_fragment(out, &d.description);
            push_fragment(out, &d.url);
        }
        BlockPayload::FilePath(d) => {
            push_fragment(out, &d.path);
            push_fragment(out, &d.display_name);
        }
        BlockPayload::Reminder(d) => push_fragment(out, &d.title),
    }
}

/// Case-insensitive substring match against the note's search string.
/// An empty or whitespace-only query matches every note.
pub fn note_matches(note: &Note, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    note_search_text(note).to_lowercase().contains(&needle)
}

fn push_fragment(out: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::accordion::{AccordionData, HeadingLevel};
    use crate::core::block::{Block, BlockPayload, BookmarkData, TextData};
    use crate::core::column::ColumnData;
    use crate::core::list::{ListData, ListKind};
    use crate::core::table::TableGrid;
    use crate::RichTextValue;

    #[test]
    fn test_accordion_heading_precedes_nested_items_in_order() {
        let mut list = ListData::new(ListKind::Bullet);
        list.push_item("a");
        list.push_item("b");

        let mut accordion = Block::new(
            BlockPayload::Accordion(AccordionData::new("Groceries", HeadingLevel::H2)),
            0,
        );
        accordion.push_child(Block::new(BlockPayload::List(list), 0));

        let mut note = Note::new("Weekend");
        note.insert_block(accordion);

        let text = note_search_text(&note);
        let heading = text.find("Groceries").unwrap();
        let a = text.find('a').unwrap();
        let b = text.find('b').unwrap();
        assert!(heading < a, "heading must precede items: {text}");
        assert!(a < b, "item order must be preserved: {text}");
    }

    #[test]
    fn test_title_category_and_tags_included() {
        let mut note = Note::new("Trip plan");
        note.category = Some(crate::Category::new("Travel"));
        note.tags = vec!["2026".to_string(), "summer".to_string()];
        let text = note_search_text(&note);
        assert_eq!(text, "Trip plan Travel 2026 summer");
    }

    #[test]
    fn test_image_contributes_nothing() {
        let mut note = Note::new("");
        note.append_block(BlockPayload::Image(crate::ImageData {
            source_path: "media/cat.png".to_string(),
            caption: "cat".to_string(),
        }));
        assert_eq!(note_search_text(&note), "");
    }

    #[test]
    fn test_table_title_and_cells_extracted() {
        let mut grid = TableGrid::new(2, 2);
        grid.title = "Budget".to_string();
        grid.set_cell(1, 0, RichTextValue::from("rent"));
        grid.set_cell(0, 1, RichTextValue::from("food"));

        let mut note = Note::new("");
        note.append_block(BlockPayload::Table(grid));
        // Row-major: (0,1) before (1,0) regardless of write order.
        assert_eq!(note_search_text(&note), "Budget food rent");
    }

    #[test]
    fn test_columns_visited_in_column_order() {
        let mut columns = ColumnData::new(2);
        columns.columns[1].push_block(Block::new(BlockPayload::Text(TextData::from("right")), 0));
        columns.columns[0].push_block(Block::new(BlockPayload::Text(TextData::from("left")), 0));

        let mut note = Note::new("");
        note.append_block(BlockPayload::Columns(columns));
        assert_eq!(note_search_text(&note), "left right");
    }

    #[test]
    fn test_bookmark_fields_searchable() {
        let mut bookmark = BookmarkData::new("https://rust-lang.org");
        bookmark.title = "Rust".to_string();
        bookmark.description = "systems language".to_string();

        let mut note = Note::new("links");
        note.append_block(BlockPayload::Bookmark(bookmark));
        assert!(note_matches(&note, "SYSTEMS"));
        assert!(note_matches(&note, "rust-lang.org"));
        assert!(!note_matches(&note, "python"));
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let mut note = Note::new("Meeting Notes");
        note.append_block(BlockPayload::Text(TextData::from("Quarterly Review")));
        assert!(note_matches(&note, "quarterly"));
        assert!(note_matches(&note, "eeting"));
        assert!(note_matches(&note, ""));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let mut note = Note::new("stable");
        note.append_block(BlockPayload::Text(TextData::from("one")));
        note.append_block(BlockPayload::Text(TextData::from("two")));
        assert_eq!(note_search_text(&note), note_search_text(&note));
        assert_eq!(note_search_text(&note), "stable one two");
    }
}
