//! Settings and their persistence.

/// Settings consumed by the gallery core.
pub mod settings;
/// TOML persistence for settings.
pub mod storage;

pub use settings::{AppSettings, DEFAULT_METADATA_KEY, DEFAULT_PAGE_SIZE};
pub use storage::{ConfigError, StorageManager};
