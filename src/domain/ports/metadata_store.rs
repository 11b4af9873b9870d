//! Port definition for the document metadata store.

/// Result type for metadata operations.
pub type MetadataResult<T> = std::result::Result<T, MetadataError>;

/// Errors raised by a [`MetadataStorePort`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The document could not be read or written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The document content could not be interpreted.
    #[error("invalid document: {0}")]
    InvalidDocument(String),
}

/// Outcome of a property write against the active document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// Exactly one key/value pair was written, overwriting any prior value.
    Written,
    /// No document is active; nothing was written.
    NoActiveDocument,
}

/// Port for writing metadata properties on the currently active document.
///
/// The gallery never inspects document content; it only performs this one
/// write when the user selects an image.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataStorePort: Send + Sync {
    /// Sets `key` to `value` on the active document's metadata block.
    async fn set_active_property(&self, key: &str, value: &str) -> MetadataResult<SetOutcome>;
}
