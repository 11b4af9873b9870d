//! Deterministic locator generation for the remote banner catalog.

use crate::domain::entities::ImageLocator;

/// Total number of images in the remote catalog.
pub const TOTAL_COUNT: usize = 1865;

/// Base path of the catalog; indices are appended as zero-padded file names.
pub const BASE_URL: &str =
    "https://raw.githubusercontent.com/Rerurate514/img_dwnldr_wikigg_ak_kt/refs/heads/master/img/";

const EXTENSION: &str = ".png";

/// Minimum width of the decimal index in a locator. Indices with more digits
/// are not truncated, they simply grow wider.
const INDEX_PAD_WIDTH: usize = 3;

/// Builds the locator for a single 1-based catalog index.
///
/// Performs no bounds checking against [`TOTAL_COUNT`]; callers clamp.
#[must_use]
pub fn locator_for_index(index: usize) -> ImageLocator {
    ImageLocator::new(format!(
        "{BASE_URL}{index:0width$}{EXTENSION}",
        width = INDEX_PAD_WIDTH
    ))
}

/// Produces `count` locators for the indices `[start, start + count)`.
///
/// Pure and unclamped; bounds validation against the catalog size is the
/// caller's responsibility.
#[must_use]
pub fn locators_for_range(start: usize, count: usize) -> Vec<ImageLocator> {
    (start..start + count).map(locator_for_index).collect()
}

/// Number of pages the catalog spans at the given page size.
#[must_use]
pub fn total_pages(page_size: usize) -> usize {
    TOTAL_COUNT.div_ceil(page_size.max(1))
}

/// Locators for a 1-based page, clamped to the catalog bound.
///
/// The last page may yield fewer than `page_size` locators; indices past
/// [`TOTAL_COUNT`] are never generated.
#[must_use]
pub fn page_locators(page: usize, page_size: usize) -> Vec<ImageLocator> {
    let start = (page - 1) * page_size + 1;
    if start > TOTAL_COUNT {
        return Vec::new();
    }
    let end = (start + page_size).min(TOTAL_COUNT + 1);
    (start..end).map(locator_for_index).collect()
}
