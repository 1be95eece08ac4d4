use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata attached to fragments, blocks, resources and graph nodes
pub type Metadata = BTreeMap<String, MetaValue>;

/// A single metadata value
///
/// Serialized untagged, so a `Metadata` map renders as a plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<MetaValue>),
    Map(Metadata),
}

impl MetaValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MetaValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            MetaValue::Float(f) => Some(*f),
            MetaValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[MetaValue]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<usize> for MetaValue {
    fn from(value: usize) -> Self {
        MetaValue::Integer(value as i64)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Integer(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::Text(value)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(values: Vec<String>) -> Self {
        MetaValue::List(values.into_iter().map(MetaValue::Text).collect())
    }
}

/// Keys each stage is allowed to write
pub mod keys {
    // Segmenter, text fragments
    pub const LENGTH: &str = "length";
    pub const WORD_COUNT: &str = "word_count";

    // Segmenter, JSON fragments
    pub const PATH: &str = "path";
    pub const DEPTH: &str = "depth";
    pub const PROPERTY_COUNT: &str = "property_count";
    pub const ARRAY_LENGTH: &str = "array_length";
    pub const VALUE_TYPE: &str = "value_type";

    // Tree builder
    pub const FRAGMENT_COUNT: &str = "fragment_count";
    pub const SIZE: &str = "size";
    pub const TOTAL_FRAGMENTS: &str = "total_fragments";
    pub const TOTAL_BLOCKS: &str = "total_blocks";

    /// Prefix for every key the analyzer merges in
    pub const SEMANTIC_PREFIX: &str = "semantic_";

    // Link graph
    pub const PLACEHOLDER: &str = "placeholder";
    pub const TOTAL_NODES: &str = "total_nodes";
    pub const TOTAL_ROOTS: &str = "total_roots";
    pub const PLACEHOLDER_NODES: &str = "placeholder_nodes";
    pub const SKIPPED_LINES: &str = "skipped_lines";

    // Project compiler
    pub const MISSING_FILE: &str = "missing_file";
    pub const CONTENT_KIND: &str = "content_kind";
    pub const PROJECT_FILE: &str = "project_file";
    pub const COMPILED_NODES: &str = "compiled_nodes";
}
