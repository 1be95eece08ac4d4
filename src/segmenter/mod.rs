mod fragment;
mod json;
mod text;


pub use fragment::{Fragment, FragmentKind};
pub use json::{MAX_JSON_DEPTH, MIN_STRING_VALUE_LEN};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Separator placed between merged paragraphs and between fragments of a block
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Paragraphs shorter than this are merged with their neighbours
pub const DEFAULT_MIN_LENGTH: usize = 50;

/// Units longer than this are split at sentence boundaries
pub const DEFAULT_MAX_LENGTH: usize = 2000;

/// How raw content should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Text,
    Json,
}

impl ContentKind {
    /// Pick a content kind from a file path's extension
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => ContentKind::Json,
            _ => ContentKind::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "text",
            ContentKind::Json => "json",
        }
    }
}

/// Thresholds for text segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Paragraphs shorter than this are buffered and merged
    pub min_length: usize,
    /// Units longer than this are split into sentence chunks
    pub max_length: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Segment raw content into ordered fragments
///
/// Malformed JSON never fails: the raw content is segmented as text instead.
/// Well-formed JSON of any nesting depth is walked, truncated below
/// [`MAX_JSON_DEPTH`].
pub fn segment(content: &str, kind: ContentKind, config: &SegmenterConfig) -> Vec<Fragment> {
    let fragments = match kind {
        ContentKind::Text => text::segment_text(content, config.min_length, config.max_length),
        ContentKind::Json => match json::segment_json(content) {
            Ok(fragments) => fragments,
            Err(e) => {
                log::warn!("Malformed JSON, falling back to text segmentation: {e}");
                text::segment_text(content, config.min_length, config.max_length)
            }
        },
    };

    log::debug!(
        "Segmented {} chars of {} into {} fragments",
        content.len(),
        kind.as_str(),
        fragments.len()
    );

    fragments
}

/// Segment with the default thresholds
pub fn segment_with_defaults(content: &str, kind: ContentKind) -> Vec<Fragment> {
    segment(content, kind, &SegmenterConfig::default())
}
