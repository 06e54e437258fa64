//! Opaque rich-text values supplied by the editing surface.

use serde::{Deserialize, Serialize};

/// A span of formatted text, treated by the core as an opaque blob.
///
/// The editing surface owns the encoding of `encoded` (attribute runs,
/// colours, whatever it uses); the core never parses it. All the core
/// needs is the plain-text projection for search and the lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextValue {
    encoded: String,
    plain: String,
}

impl RichTextValue {
    /// Wraps an editor-encoded blob together with its plain-text projection.
    pub fn new(encoded: impl Into<String>, plain: impl Into<String>) -> Self {
        Self {
            encoded: encoded.into(),
            plain: plain.into(),
        }
    }

    /// The opaque editor encoding, returned verbatim.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// The plain-text projection used for search and extraction.
    pub fn plain_text(&self) -> &str {
        &self.plain
    }

    /// Length of the plain-text projection in characters.
    pub fn char_len(&self) -> usize {
        self.plain.chars().count()
    }

    /// Length of the plain-text projection in bytes.
    pub fn byte_len(&self) -> usize {
        self.plain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }
}

impl From<&str> for RichTextValue {
    /// Builds an unformatted value; the encoding is the text itself.
    fn from(text: &str) -> Self {
        Self::new(text, text)
    }
}

impl From<String> for RichTextValue {
    fn from(text: String) -> Self {
        Self::new(text.clone(), text)
    }
}
