//! Infrastructure layer: adapters for the network, filesystem, and settings.

/// Settings and persistence.
pub mod config;
/// Image acquisition and caching.
pub mod image;
/// Document metadata adapters.
pub mod metadata;

pub use config::{AppSettings, StorageManager};
pub use image::{HttpImageFetcher, ImageSource};
pub use metadata::FrontmatterStore;
