//! Document metadata adapters.

/// Markdown frontmatter implementation of the metadata store port.
pub mod frontmatter;

pub use frontmatter::FrontmatterStore;
