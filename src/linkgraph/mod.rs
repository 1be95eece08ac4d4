mod graph;
mod parser;

#[cfg(test)]
mod tests;

pub use graph::{GraphNode, NodeId, ProjectGraph};
pub use parser::parse_links;
