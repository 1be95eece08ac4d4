//! Turns unstructured text, JSON documents and link-notation project files
//! into hierarchical, annotated block trees.
//!
//! The pipeline is Segmenter → TreeBuilder → Analyzer; the link-notation
//! parser builds a project graph whose nodes carry the compiled files.

// Public API exports
pub mod analyzer;
pub mod config;
pub mod linkgraph;
pub mod metadata;
pub mod project;
pub mod sandbox;
pub mod security;
pub mod segmenter;
pub mod tree;

// Re-export main types for convenience
pub use analyzer::{analyze, analyze_text, ContentCategory, ReadabilityLevel, TextAnalysis};
pub use config::{CompilerConfig, ConfigError};
pub use linkgraph::{parse_links, GraphNode, NodeId, ProjectGraph};
pub use metadata::{MetaValue, Metadata};
pub use project::{ProjectCompiler, ProjectError};
pub use sandbox::{FileEntry, Sandbox, SandboxBuilder, SandboxError};
pub use security::PathSanitizer;
pub use segmenter::{segment, ContentKind, Fragment, FragmentKind, SegmenterConfig};
pub use tree::{Block, ParsedResource};

/// Run segment, build and analyze over one piece of content
///
/// The resource type is the content kind's name.
pub fn compile(
    content: &str,
    kind: ContentKind,
    resource_id: &str,
    config: &CompilerConfig,
) -> ParsedResource {
    let fragments = segment(content, kind, &config.segmenter);
    let resource = tree::build(fragments, resource_id, kind.as_str(), config.max_block_size);
    analyze(resource)
}
