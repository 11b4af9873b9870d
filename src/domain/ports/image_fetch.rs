//! Port definition for fetching raw image bytes.

use bytes::Bytes;

use crate::domain::entities::ImageLocator;

/// Result type for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type for load operations.
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Transport-level errors raised by an [`ImageFetchPort`] implementation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Connection-level failure (DNS, TLS, timeout, ...).
    #[error("network error: {0}")]
    Network(String),
    /// The host answered with a non-success status code.
    #[error("http status {0}")]
    Http(u16),
}

/// A single image failed to load.
///
/// Non-fatal: the failed locator is never cached, so a later load retries
/// from scratch. Cloneable so the same failure can be observed by every
/// caller sharing an in-flight load.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to load {locator}: {kind}")]
pub struct LoadError {
    /// The locator whose load failed.
    pub locator: ImageLocator,
    /// What went wrong.
    pub kind: LoadErrorKind,
}

/// Cause of a [`LoadError`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadErrorKind {
    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),
    /// Non-success status from the image host.
    #[error("http status {0}")]
    Http(u16),
    /// The downloaded bytes could not be decoded as an image.
    #[error("decode error: {0}")]
    Decode(String),
    /// The background load task was aborted or panicked.
    #[error("load task failed: {0}")]
    Task(String),
}

impl LoadError {
    /// Wraps a transport error for the given locator.
    #[must_use]
    pub fn from_fetch(locator: ImageLocator, error: FetchError) -> Self {
        let kind = match error {
            FetchError::Network(msg) => LoadErrorKind::Network(msg),
            FetchError::Http(status) => LoadErrorKind::Http(status),
        };
        Self { locator, kind }
    }

    /// Creates a decode failure for the given locator.
    #[must_use]
    pub fn decode(locator: ImageLocator, message: impl Into<String>) -> Self {
        Self {
            locator,
            kind: LoadErrorKind::Decode(message.into()),
        }
    }

    /// Creates a task failure for the given locator.
    #[must_use]
    pub fn task(locator: ImageLocator, message: impl Into<String>) -> Self {
        Self {
            locator,
            kind: LoadErrorKind::Task(message.into()),
        }
    }
}

/// Port for fetching the raw bytes of a catalog image.
///
/// This is the only seam that touches the network; the cache and
/// deduplication discipline live above it.
#[async_trait::async_trait]
pub trait ImageFetchPort: Send + Sync {
    /// Fetches the raw encoded bytes behind a locator.
    async fn fetch(&self, locator: &ImageLocator) -> FetchResult<Bytes>;
}
