use crate::metadata::Metadata;
use serde::{Deserialize, Serialize};

/// Smallest segmented unit of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Text content of this fragment
    pub content: String,
    /// What produced this fragment
    pub kind: FragmentKind,
    /// 0-based emission order within one resource
    pub order: usize,
    /// Dotted/bracketed JSON path, absent for text
    pub parent_key: Option<String>,
    /// Stage-specific annotations
    pub metadata: Metadata,
}

/// Classification of fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    /// Paragraph (or paragraph chunk) of plain text
    Paragraph,
    /// Standalone JSON string value
    JsonValue,
    /// Summary of a JSON object
    JsonObject,
    /// Summary of a JSON array
    JsonArray,
}

impl FragmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentKind::Paragraph => "paragraph",
            FragmentKind::JsonValue => "json_value",
            FragmentKind::JsonObject => "json_object",
            FragmentKind::JsonArray => "json_array",
        }
    }
}

impl Fragment {
    /// Length of the content in characters
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
