mod builder;
mod types;

#[cfg(test)]
mod tests;

pub use builder::build;
pub use types::{Block, ParsedResource};

/// Kind tag carried by every block
pub const BLOCK_KIND: &str = "block";

/// Maximum characters per block (a single larger fragment may exceed it)
pub const DEFAULT_MAX_BLOCK_SIZE: usize = 8000;

/// Resource type used when the caller does not name one
pub const DEFAULT_RESOURCE_TYPE: &str = "text";
