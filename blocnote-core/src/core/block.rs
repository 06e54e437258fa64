//! The block tree node and its closed payload union.
//!
//! A note's content is a forest of [`Block`]s. Each block carries exactly
//! one payload variant; the tagged union makes the "one populated payload
//! per node" invariant structural rather than conventional. Two variants
//! recurse — [`BlockPayload::Accordion`] and [`BlockPayload::Columns`] —
//! and every traversal in this crate special-cases exactly those two.
//! All other variants are leaves.

use crate::core::accordion::AccordionData;
use crate::core::column::ColumnData;
use crate::core::list::{ListData, ListKind};
use crate::core::table::TableGrid;
use crate::RichTextValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies the container a block lives in, by id.
///
/// This is a lookup aid only — ownership runs the other way (container
/// holds the block), so the back-reference never keeps anything alive.
/// A block is in an accordion or in a column, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParentRef {
    /// Id of the accordion block whose `content_blocks` own this block.
    Accordion(String),
    /// Id of the [`Column`](crate::Column) whose `blocks` own this block.
    Column(String),
}

/// The bare variant tag of a block, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Text,
    Table,
    Accordion,
    Code,
    Image,
    Columns,
    List,
    Quote,
    Bookmark,
    FilePath,
    Reminder,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Table => "table",
            Self::Accordion => "accordion",
            Self::Code => "code",
            Self::Image => "image",
            Self::Columns => "columns",
            Self::List => "list",
            Self::Quote => "quote",
            Self::Bookmark => "bookmark",
            Self::FilePath => "file_path",
            Self::Reminder => "reminder",
        }
    }

    /// Parses a stored tag string, falling back to [`BlockKind::Text`] for
    /// anything unrecognized (tags written by newer versions must not make
    /// old data unreadable).
    pub fn parse_lossy(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "table" => Self::Table,
            "accordion" => Self::Accordion,
            "code" => Self::Code,
            "image" => Self::Image,
            "columns" => Self::Columns,
            "list" => Self::List,
            "quote" => Self::Quote,
            "bookmark" => Self::Bookmark,
            "file_path" => Self::FilePath,
            "reminder" => Self::Reminder,
            other => {
                log::warn!("unknown block kind '{other}', treating as text");
                Self::Text
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextData {
    pub content: RichTextValue,
}

impl From<&str> for TextData {
    fn from(text: &str) -> Self {
        Self {
            content: RichTextValue::from(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteData {
    pub content: RichTextValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeData {
    pub source: String,
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageData {
    /// Store-relative path of the image file; the core never opens it.
    pub source_path: String,
    pub caption: String,
}

/// A saved web link plus whatever the metadata fetcher has found so far.
///
/// The fetch itself happens outside the core; this record only receives
/// the result via [`BookmarkData::apply_metadata`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkData {
    pub url: String,
    pub title: String,
    pub description: String,
    pub favicon_url: String,
    pub og_image_url: String,
    /// Unix seconds of the last successful metadata fetch.
    pub fetched_at: Option<i64>,
}

/// Result of one completed bookmark-metadata fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarkMetadata {
    pub title: String,
    pub description: String,
    pub favicon_url: String,
    pub og_image_url: String,
    pub fetched_at: i64,
}

impl BookmarkData {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn apply_metadata(&mut self, metadata: &BookmarkMetadata) {
        self.title = metadata.title.clone();
        self.description = metadata.description.clone();
        self.favicon_url = metadata.favicon_url.clone();
        self.og_image_url = metadata.og_image_url.clone();
        self.fetched_at = Some(metadata.fetched_at);
    }
}

/// A link to a local file plus its cached stat information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilePathData {
    pub path: String,
    pub display_name: String,
    pub size_bytes: Option<u64>,
    pub modified_at: Option<i64>,
    pub is_directory: bool,
    /// Unix seconds of the last successful stat.
    pub fetched_at: Option<i64>,
}

/// Result of one completed file stat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub display_name: String,
    pub size_bytes: u64,
    pub modified_at: i64,
    pub is_directory: bool,
    pub fetched_at: i64,
}

impl FilePathData {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn apply_metadata(&mut self, metadata: &FileMetadata) {
        self.display_name = metadata.display_name.clone();
        self.size_bytes = Some(metadata.size_bytes);
        self.modified_at = Some(metadata.modified_at);
        self.is_directory = metadata.is_directory;
        self.fetched_at = Some(metadata.fetched_at);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderData {
    pub title: String,
    /// Unix seconds the reminder is due, if scheduled.
    pub due_at: Option<i64>,
    pub is_completed: bool,
}

/// The one populated payload of a block, tagged by variant.
///
/// Deserialization is manual so that an unrecognized tag degrades to an
/// empty Text block instead of making the whole note unreadable; see
/// [`BlockKind::parse_lossy`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockPayload {
    Text(TextData),
    Table(TableGrid),
    Accordion(AccordionData),
    Code(CodeData),
    Image(ImageData),
    Columns(ColumnData),
    List(ListData),
    Quote(QuoteData),
    Bookmark(BookmarkData),
    FilePath(FilePathData),
    Reminder(ReminderData),
}

impl<'de> Deserialize<'de> for BlockPayload {
    /// Routes the `type` tag through [`BlockKind::parse_lossy`]: known
    /// tags deserialize into their variant, unknown tags (data written
    /// by a newer version) fall back to an empty Text payload rather
    /// than failing the whole tree.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let value = serde_json::Value::deserialize(deserializer)?;
        let tag = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("text")
            .to_owned();
        let kind = BlockKind::parse_lossy(&tag);
        if kind.as_str() != tag {
            // parse_lossy already logged; the stored fields belong to a
            // variant this version does not know, so none survive.
            return Ok(Self::Text(TextData::default()));
        }

        fn data<T, E>(value: serde_json::Value) -> std::result::Result<T, E>
        where
            T: serde::de::DeserializeOwned,
            E: Error,
        {
            // Payload structs ignore the leftover "type" key.
            serde_json::from_value(value).map_err(E::custom)
        }

        Ok(match kind {
            BlockKind::Text => Self::Text(data(value)?),
            BlockKind::Table => Self::Table(data(value)?),
            BlockKind::Accordion => Self::Accordion(data(value)?),
            BlockKind::Code => Self::Code(data(value)?),
            BlockKind::Image => Self::Image(data(value)?),
            BlockKind::Columns => Self::Columns(data(value)?),
            BlockKind::List => Self::List(data(value)?),
            BlockKind::Quote => Self::Quote(data(value)?),
            BlockKind::Bookmark => Self::Bookmark(data(value)?),
            BlockKind::FilePath => Self::FilePath(data(value)?),
            BlockKind::Reminder => Self::Reminder(data(value)?),
        })
    }
}

impl BlockPayload {
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Text(_) => BlockKind::Text,
            Self::Table(_) => BlockKind::Table,
            Self::Accordion(_) => BlockKind::Accordion,
            Self::Code(_) => BlockKind::Code,
            Self::Image(_) => BlockKind::Image,
            Self::Columns(_) => BlockKind::Columns,
            Self::List(_) => BlockKind::List,
            Self::Quote(_) => BlockKind::Quote,
            Self::Bookmark(_) => BlockKind::Bookmark,
            Self::FilePath(_) => BlockKind::FilePath,
            Self::Reminder(_) => BlockKind::Reminder,
        }
    }
}

/// One node of note content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    /// Display position among siblings; ascending, not densely packed.
    pub order_index: i32,
    pub payload: BlockPayload,
    /// Which container owns this block, if it is nested. `None` for
    /// top-level blocks owned directly by the note.
    pub parent: Option<ParentRef>,
}

impl Block {
    pub fn new(payload: BlockPayload, order_index: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            order_index,
            payload,
            parent: None,
        }
    }

    pub fn kind(&self) -> BlockKind {
        self.payload.kind()
    }

    /// Human-readable variant name, a pure function of the tag (and the
    /// list sub-kind for lists).
    pub fn display_name(&self) -> &'static str {
        match &self.payload {
            BlockPayload::Text(_) => "Text",
            BlockPayload::Table(_) => "Table",
            BlockPayload::Accordion(_) => "Accordion",
            BlockPayload::Code(_) => "Code",
            BlockPayload::Image(_) => "Image",
            BlockPayload::Columns(_) => "Columns",
            BlockPayload::List(list) => match list.kind {
                ListKind::Bullet => "Bullet List",
                ListKind::Numbered => "Numbered List",
                ListKind::Checkbox => "Checklist",
            },
            BlockPayload::Quote(_) => "Quote",
            BlockPayload::Bookmark(_) => "Bookmark",
            BlockPayload::FilePath(_) => "File",
            BlockPayload::Reminder(_) => "Reminder",
        }
    }

    /// Appends `child` inside this block if it is an accordion, taking
    /// ownership, pointing the child's back-reference here and assigning
    /// it the next free order index. When this block is not an accordion
    /// the child is handed back unchanged.
    ///
    /// Column nesting goes through [`Column::push_block`](crate::Column::push_block)
    /// instead, because the column id (not the block id) is the container.
    pub fn push_child(&mut self, mut child: Block) -> Option<Block> {
        match &mut self.payload {
            BlockPayload::Accordion(accordion) => {
                child.parent = Some(ParentRef::Accordion(self.id.clone()));
                child.order_index = accordion.next_order_index();
                accordion.content_blocks.push(child);
                None
            }
            _ => Some(child),
        }
    }
}

/// Sorts a sibling slice into display order: ascending `order_index`,
/// ties broken by id so iteration is deterministic.
pub fn sort_by_order(blocks: &[Block]) -> Vec<&Block> {
    let mut sorted: Vec<&Block> = blocks.iter().collect();
    sorted.sort_by(|a, b| a.order_index.cmp(&b.order_index).then_with(|| a.id.cmp(&b.id)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::accordion::HeadingLevel;

    #[test]
    fn test_display_name_branches_on_list_kind() {
        let bullet = Block::new(BlockPayload::List(ListData::new(ListKind::Bullet)), 0);
        let check = Block::new(BlockPayload::List(ListData::new(ListKind::Checkbox)), 1);
        assert_eq!(bullet.display_name(), "Bullet List");
        assert_eq!(check.display_name(), "Checklist");
    }

    #[test]
    fn test_parse_lossy_falls_back_to_text() {
        assert_eq!(BlockKind::parse_lossy("table"), BlockKind::Table);
        assert_eq!(BlockKind::parse_lossy("hologram"), BlockKind::Text);
    }

    #[test]
    fn test_kind_round_trips_through_as_str() {
        let kinds = [
            BlockKind::Text,
            BlockKind::Table,
            BlockKind::Accordion,
            BlockKind::Code,
            BlockKind::Image,
            BlockKind::Columns,
            BlockKind::List,
            BlockKind::Quote,
            BlockKind::Bookmark,
            BlockKind::FilePath,
            BlockKind::Reminder,
        ];
        for kind in kinds {
            assert_eq!(BlockKind::parse_lossy(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_push_child_reparents_into_accordion() {
        let mut accordion = Block::new(
            BlockPayload::Accordion(AccordionData::new("Heading", HeadingLevel::H2)),
            0,
        );
        let child = Block::new(BlockPayload::Text(TextData::from("inside")), 0);
        assert!(accordion.push_child(child).is_none());
        let BlockPayload::Accordion(data) = &accordion.payload else {
            unreachable!()
        };
        assert_eq!(
            data.content_blocks[0].parent,
            Some(ParentRef::Accordion(accordion.id.clone()))
        );
    }

    #[test]
    fn test_push_child_assigns_ascending_order_indexes() {
        let mut accordion = Block::new(
            BlockPayload::Accordion(AccordionData::new("Heading", HeadingLevel::H3)),
            0,
        );
        accordion.push_child(Block::new(BlockPayload::Text(TextData::from("a")), 0));
        accordion.push_child(Block::new(BlockPayload::Text(TextData::from("b")), 0));
        let BlockPayload::Accordion(data) = &accordion.payload else {
            unreachable!()
        };
        let orders: Vec<i32> = data.sorted_blocks().iter().map(|b| b.order_index).collect();
        assert_eq!(orders, vec![0, 1]);
    }

    #[test]
    fn test_push_child_hands_back_on_leaf_containers() {
        let mut text = Block::new(BlockPayload::Text(TextData::from("leaf")), 0);
        let child = Block::new(BlockPayload::Text(TextData::from("orphan")), 0);
        let returned = text.push_child(child).expect("leaf must hand the child back");
        assert_eq!(returned.parent, None);
    }

    #[test]
    fn test_sort_by_order_is_stable_on_sparse_indexes() {
        let blocks = vec![
            Block::new(BlockPayload::Text(TextData::from("late")), 10),
            Block::new(BlockPayload::Text(TextData::from("early")), 2),
            Block::new(BlockPayload::Text(TextData::from("middle")), 7),
        ];
        let order: Vec<i32> = sort_by_order(&blocks).iter().map(|b| b.order_index).collect();
        assert_eq!(order, vec![2, 7, 10]);
    }

    #[test]
    fn test_payload_serializes_with_type_tag() {
        let block = Block::new(BlockPayload::Code(CodeData::default()), 0);
        let json = serde_json::to_string(&block).unwrap();
        assert!(json.contains(r#""type":"code""#));
    }

    #[test]
    fn test_payload_round_trips_through_json() {
        let mut list = ListData::new(ListKind::Checkbox);
        list.push_item("milk");
        let block = Block::new(BlockPayload::List(list), 4);
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_unknown_payload_tag_deserializes_as_empty_text() {
        let json = r#"{
            "id": "b-1",
            "order_index": 2,
            "payload": { "type": "hologram", "frames": 24 },
            "parent": null
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind(), BlockKind::Text);
        let BlockPayload::Text(text) = &block.payload else {
            panic!("unknown tag should degrade to text");
        };
        assert!(text.content.is_empty());
        // Siblings and metadata survive untouched.
        assert_eq!(block.id, "b-1");
        assert_eq!(block.order_index, 2);
    }

    #[test]
    fn test_unknown_tag_does_not_poison_siblings() {
        let json = r#"[
            { "id": "b-1", "order_index": 0,
              "payload": { "type": "quote", "content": { "encoded": "q", "plain": "q" } },
              "parent": null },
            { "id": "b-2", "order_index": 1,
              "payload": { "type": "voice_memo", "duration": 12.5 },
              "parent": null }
        ]"#;
        let blocks: Vec<Block> = serde_json::from_str(json).unwrap();
        assert_eq!(blocks[0].kind(), BlockKind::Quote);
        assert_eq!(blocks[1].kind(), BlockKind::Text);
    }

    #[test]
    fn test_bookmark_apply_metadata() {
        let mut bookmark = BookmarkData::new("https://example.org");
        bookmark.apply_metadata(&BookmarkMetadata {
            title: "Example".to_string(),
            description: "A domain".to_string(),
            favicon_url: "https://example.org/favicon.ico".to_string(),
            og_image_url: String::new(),
            fetched_at: 1_700_000_000,
        });
        assert_eq!(bookmark.title, "Example");
        assert_eq!(bookmark.fetched_at, Some(1_700_000_000));
        assert_eq!(bookmark.url, "https://example.org");
    }

    #[test]
    fn test_file_path_apply_metadata() {
        let mut file = FilePathData::new("/tmp/report.pdf");
        file.apply_metadata(&FileMetadata {
            display_name: "report.pdf".to_string(),
            size_bytes: 4096,
            modified_at: 1_690_000_000,
            is_directory: false,
            fetched_at: 1_700_000_000,
        });
        assert_eq!(file.display_name, "report.pdf");
        assert_eq!(file.size_bytes, Some(4096));
        assert!(!file.is_directory);
    }
}
