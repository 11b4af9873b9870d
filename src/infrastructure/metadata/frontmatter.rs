//! Markdown frontmatter adapter for the metadata store port.
//!
//! Upserts a single `key: "value"` line inside the leading `---` block of
//! the active markdown document, creating the block when the document has
//! none.

use std::path::PathBuf;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::ports::{MetadataResult, MetadataStorePort, SetOutcome};

/// Writes metadata properties into a markdown file's frontmatter.
///
/// The "active document" is whatever path was last handed to
/// [`FrontmatterStore::set_active`]; without one every write is a no-op.
#[derive(Debug, Default)]
pub struct FrontmatterStore {
    active: Mutex<Option<PathBuf>>,
}

impl FrontmatterStore {
    /// Creates a store with no active document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a document as active.
    pub fn set_active(&self, path: impl Into<PathBuf>) {
        *self.active.lock() = Some(path.into());
    }

    /// Clears the active document.
    pub fn clear_active(&self) {
        *self.active.lock() = None;
    }

    /// Path of the active document, if any.
    #[must_use]
    pub fn active(&self) -> Option<PathBuf> {
        self.active.lock().clone()
    }
}

#[async_trait::async_trait]
impl MetadataStorePort for FrontmatterStore {
    async fn set_active_property(&self, key: &str, value: &str) -> MetadataResult<SetOutcome> {
        let Some(path) = self.active() else {
            return Ok(SetOutcome::NoActiveDocument);
        };

        let content = tokio::fs::read_to_string(&path).await?;
        let updated = upsert_property(&content, key, value);
        tokio::fs::write(&path, updated).await?;

        debug!(path = %path.display(), key, "frontmatter property written");
        Ok(SetOutcome::Written)
    }
}

/// Rewrites `content` so its frontmatter holds `key: "value"`.
///
/// An existing assignment for `key` is replaced in place; otherwise the
/// property is appended at the end of the block. Documents without a
/// frontmatter block get one prepended.
fn upsert_property(content: &str, key: &str, value: &str) -> String {
    let property = format!("{key}: \"{value}\"");
    let lines: Vec<&str> = content.lines().collect();

    if lines.first().map(|l| l.trim_end()) == Some("---") {
        if let Some(offset) = lines[1..].iter().position(|l| l.trim_end() == "---") {
            let close = offset + 1;
            let prefix = format!("{key}:");
            let mut updated: Vec<String> = lines.iter().map(ToString::to_string).collect();

            if let Some(line) = updated[1..close]
                .iter_mut()
                .find(|l| l.trim_start().starts_with(&prefix))
            {
                *line = property;
            } else {
                updated.insert(close, property);
            }

            let mut result = updated.join("\n");
            if content.ends_with('\n') {
                result.push('\n');
            }
            return result;
        }
    }

    format!("---\n{property}\n---\n{content}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_upsert_creates_block_when_absent() {
        let updated = upsert_property("# Title\n\nBody\n", "banner", "https://img.test/001.png");
        assert_eq!(
            updated,
            "---\nbanner: \"https://img.test/001.png\"\n---\n# Title\n\nBody\n"
        );
    }

    #[test]
    fn test_upsert_appends_to_existing_block() {
        let doc = "---\ntitle: note\n---\nBody\n";
        let updated = upsert_property(doc, "banner", "https://img.test/002.png");
        assert_eq!(
            updated,
            "---\ntitle: note\nbanner: \"https://img.test/002.png\"\n---\nBody\n"
        );
    }

    #[test]
    fn test_upsert_overwrites_existing_value() {
        let doc = "---\nbanner: \"old\"\ntitle: note\n---\nBody\n";
        let updated = upsert_property(doc, "banner", "new-url");
        assert_eq!(updated, "---\nbanner: \"new-url\"\ntitle: note\n---\nBody\n");
    }

    #[test]
    fn test_upsert_fills_empty_block() {
        let updated = upsert_property("---\n---\nBody\n", "banner", "url");
        assert_eq!(updated, "---\nbanner: \"url\"\n---\nBody\n");
    }

    #[test]
    fn test_key_in_body_is_not_frontmatter() {
        let doc = "---\ntitle: note\n---\nbanner: body text\n";
        let updated = upsert_property(doc, "banner", "url");
        assert_eq!(
            updated,
            "---\ntitle: note\nbanner: \"url\"\n---\nbanner: body text\n"
        );
    }

    #[tokio::test]
    async fn test_write_without_active_document_is_a_no_op() {
        let store = FrontmatterStore::new();
        let outcome = store.set_active_property("banner", "url").await.unwrap();
        assert_eq!(outcome, SetOutcome::NoActiveDocument);
    }

    #[tokio::test]
    async fn test_write_updates_active_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.md");
        tokio::fs::write(&path, "# Note\n").await.unwrap();

        let store = FrontmatterStore::new();
        store.set_active(&path);

        let outcome = store
            .set_active_property("banner", "https://img.test/007.png")
            .await
            .unwrap();
        assert_eq!(outcome, SetOutcome::Written);

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(
            content,
            "---\nbanner: \"https://img.test/007.png\"\n---\n# Note\n"
        );
    }

    #[tokio::test]
    async fn test_missing_document_surfaces_io_error() {
        let store = FrontmatterStore::new();
        store.set_active("/nonexistent/note.md");

        let result = store.set_active_property("banner", "url").await;
        assert!(result.is_err());
    }
}
