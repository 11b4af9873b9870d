//! User-facing settings.

use serde::{Deserialize, Serialize};

use crate::infrastructure::image::catalog::{TOTAL_COUNT, total_pages};

/// Default metadata key written on selection.
pub const DEFAULT_METADATA_KEY: &str = "banner";

/// Default number of images per gallery page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Settings consumed read-only by the gallery core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Property name written on the active document when an image is selected.
    #[serde(default = "default_metadata_key")]
    pub metadata_key: String,

    /// Number of locators per gallery page; drives the page count.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_metadata_key() -> String {
    DEFAULT_METADATA_KEY.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            metadata_key: default_metadata_key(),
            page_size: default_page_size(),
        }
    }
}

impl AppSettings {
    /// Returns a copy with out-of-range values forced back into bounds.
    ///
    /// The page size is kept within `[1, TOTAL_COUNT]` and an empty metadata
    /// key falls back to the default.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.page_size = self.page_size.clamp(1, TOTAL_COUNT);
        if self.metadata_key.trim().is_empty() {
            self.metadata_key = default_metadata_key();
        }
        self
    }

    /// Total number of gallery pages at this page size.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.page_size)
    }
}
