use super::{Block, ParsedResource, BLOCK_KIND};
use crate::metadata::{keys, Metadata};
use crate::segmenter::{Fragment, PARAGRAPH_SEPARATOR};

/// Pack fragments into blocks according to the rules:
/// - Keep fragment order, never drop or duplicate a fragment
/// - Close the current block when the next fragment would push it past
///   `max_block_size`
/// - Never split a fragment; an oversized one gets a block of its own
pub fn build(
    fragments: Vec<Fragment>,
    resource_id: impl Into<String>,
    resource_type: impl Into<String>,
    max_block_size: usize,
) -> ParsedResource {
    let total_fragments = fragments.len();
    let mut blocks = Vec::new();
    let mut current_batch: Vec<Fragment> = Vec::new();
    let mut current_size = 0;

    for fragment in fragments {
        let fragment_size = fragment.len();

        // Check if adding this fragment would exceed the budget
        if current_size + fragment_size > max_block_size && !current_batch.is_empty() {
            let order = blocks.len();
            blocks.push(create_block(order, current_batch, current_size));
            current_batch = Vec::new();
            current_size = 0;
        }

        current_size += fragment_size;
        current_batch.push(fragment);
    }

    if !current_batch.is_empty() {
        let order = blocks.len();
        blocks.push(create_block(order, current_batch, current_size));
    }

    let mut metadata = Metadata::new();
    metadata.insert(keys::TOTAL_FRAGMENTS.into(), total_fragments.into());
    metadata.insert(keys::TOTAL_BLOCKS.into(), blocks.len().into());

    let resource = ParsedResource {
        resource_id: resource_id.into(),
        resource_type: resource_type.into(),
        metadata,
        blocks,
    };

    log::debug!(
        "Built {} blocks from {} fragments for {}",
        resource.blocks.len(),
        total_fragments,
        resource.resource_id
    );

    resource
}

/// Create a block from a batch of fragments
fn create_block(order: usize, fragments: Vec<Fragment>, size: usize) -> Block {
    let content = fragments
        .iter()
        .map(|f| f.content.as_str())
        .collect::<Vec<_>>()
        .join(PARAGRAPH_SEPARATOR);

    let mut metadata = Metadata::new();
    metadata.insert(keys::FRAGMENT_COUNT.into(), fragments.len().into());
    metadata.insert(keys::SIZE.into(), size.into());

    Block {
        order,
        kind: BLOCK_KIND.to_string(),
        content,
        fragments,
        metadata,
    }
}
