//! Domain entities.

/// Image locator and handle types.
pub mod locator;
/// Pagination state snapshot.
pub mod page;

pub use locator::{ImageHandle, ImageLocator};
pub use page::PaginationState;
