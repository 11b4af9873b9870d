//! Port definitions for external collaborators.
//!
//! Implementations must be thread-safe; the production adapters live in the
//! infrastructure layer.

/// Image fetching port and load error taxonomy.
pub mod image_fetch;
/// Document metadata store port.
pub mod metadata_store;

pub use image_fetch::{FetchError, FetchResult, ImageFetchPort, LoadError, LoadErrorKind, LoadResult};
pub use metadata_store::{MetadataError, MetadataResult, MetadataStorePort, SetOutcome};

#[cfg(test)]
pub use metadata_store::MockMetadataStorePort;
