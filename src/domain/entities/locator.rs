//! Locator and handle types for catalog images.

use std::sync::Arc;

/// Handle to a decoded image, shared between the cache and its consumers.
pub type ImageHandle = Arc<image::DynamicImage>;

/// Deterministic string identifier of an image in the remote catalog.
///
/// Locators are full URLs derived from a 1-based catalog index; two distinct
/// indices never produce the same locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageLocator(String);

impl ImageLocator {
    /// Creates a locator from any string-like input.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the locator as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the locator and returns the inner URL.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ImageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ImageLocator {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ImageLocator {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_display_matches_inner_url() {
        let locator = ImageLocator::new("https://example.com/007.png");
        assert_eq!(locator.to_string(), "https://example.com/007.png");
        assert_eq!(locator.as_str(), "https://example.com/007.png");
    }

    #[test]
    fn test_locator_equality_and_hash_by_url() {
        let a = ImageLocator::from("https://example.com/001.png");
        let b = ImageLocator::from("https://example.com/001.png".to_string());
        assert_eq!(a, b);
    }
}
