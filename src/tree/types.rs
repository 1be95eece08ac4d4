use crate::metadata::Metadata;
use crate::segmenter::Fragment;
use serde::{Deserialize, Serialize};

/// A size-bounded, ordered run of fragments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Index of this block within its resource
    pub order: usize,
    /// Always [`super::BLOCK_KIND`]
    pub kind: String,
    /// Fragment contents joined by a blank line
    pub content: String,
    /// Fragments in this block, never empty
    pub fragments: Vec<Fragment>,
    pub metadata: Metadata,
}

/// The compiled tree for one input document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResource {
    pub resource_id: String,
    pub resource_type: String,
    pub metadata: Metadata,
    pub blocks: Vec<Block>,
}

impl Block {
    /// Sum of fragment lengths in characters
    pub fn size(&self) -> usize {
        self.fragments.iter().map(Fragment::len).sum()
    }
}

impl ParsedResource {
    /// All fragments in block order
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.blocks.iter().flat_map(|b| b.fragments.iter())
    }

    pub fn fragment_count(&self) -> usize {
        self.blocks.iter().map(|b| b.fragments.len()).sum()
    }
}
