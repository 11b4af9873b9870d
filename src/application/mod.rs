//! Application layer: gallery orchestration.

/// Paginated gallery controller and render model.
pub mod gallery;

pub use gallery::{GalleryCell, GalleryController, LazyImage, PageView, SelectionOutcome};
