mod category;
mod text_stats;


pub use category::ContentCategory;
pub use text_stats::{analyze_text, ReadabilityLevel, TextAnalysis};

use crate::metadata::keys::SEMANTIC_PREFIX;
use crate::tree::ParsedResource;

/// Enrich a built resource bottom-up with `semantic_*` metadata
///
/// Every fragment is analyzed on its own content, every block on its joined
/// content, and the resource on all block contents joined by single spaces.
/// Existing metadata keys are kept; analyzer keys overwrite on collision.
pub fn analyze(mut resource: ParsedResource) -> ParsedResource {
    for block in &mut resource.blocks {
        for fragment in &mut block.fragments {
            let analysis = analyze_text(&fragment.content);
            fragment.metadata.extend(analysis.to_metadata(SEMANTIC_PREFIX));
        }

        let analysis = analyze_text(&block.content);
        block.metadata.extend(analysis.to_metadata(SEMANTIC_PREFIX));
    }

    let full_text = resource
        .blocks
        .iter()
        .map(|b| b.content.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let analysis = analyze_text(&full_text);
    let semantic = analysis.to_metadata(SEMANTIC_PREFIX);
    resource.metadata.extend(semantic);

    log::debug!(
        "Analyzed {} ({} blocks, category {})",
        resource.resource_id,
        resource.blocks.len(),
        analysis.content_category.as_str()
    );

    resource
}
