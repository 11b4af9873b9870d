//! bannerpick - A paginated gallery over a fixed remote image catalog.
//!
//! This crate provides the image acquisition and caching layer for browsing
//! a remotely-hosted banner catalog, a paginated gallery controller with
//! preloading and speculative prefetch, and a frontmatter adapter that
//! writes the selected image URL into a document's metadata.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the gallery controller and render model.
pub mod application;
/// Domain layer containing entities and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "bannerpick";
