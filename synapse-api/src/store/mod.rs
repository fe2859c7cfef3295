//! Document Store Seam
//!
//! Byte-level storage keyed by `(brain_id, name)`. The gateway's document
//! service composes validation, collision handling, and engine signaling on
//! top of this narrow interface; implementations only move bytes.

use async_trait::async_trait;
use synapse_core::{BrainId, DocumentMeta, StorageError};

pub mod fs;
pub mod memory;

pub use fs::FsDocumentStore;
pub use memory::MemoryDocumentStore;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StorageError>;

/// Byte-level document storage.
///
/// `put` must refuse to overwrite: name collisions are an `AlreadyExists`
/// error, and the caller picks a fresh name. `list` returns documents in
/// insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document. Fails with `AlreadyExists` if the name is taken.
    async fn put(
        &self,
        brain_id: BrainId,
        name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> StoreResult<DocumentMeta>;

    /// Fetch a document's metadata and bytes.
    async fn get(&self, brain_id: BrainId, name: &str) -> StoreResult<(DocumentMeta, Vec<u8>)>;

    /// List all documents for a brain, insertion order.
    async fn list(&self, brain_id: BrainId) -> StoreResult<Vec<DocumentMeta>>;

    /// Delete one document. Fails with `NotFound` if absent.
    async fn delete(&self, brain_id: BrainId, name: &str) -> StoreResult<()>;

    /// Delete all documents for a brain. No-op when the brain has none.
    async fn delete_all(&self, brain_id: BrainId) -> StoreResult<()>;

    /// Whether a document with this name exists.
    async fn exists(&self, brain_id: BrainId, name: &str) -> StoreResult<bool>;
}

/// Reject document names that could resolve outside the brain's directory.
///
/// A valid name is a single path component: no separators, no `..` or `.`,
/// no drive prefixes. Stores join the name onto a brain directory, so
/// anything else is a traversal attempt.
pub(crate) fn validate_document_name(name: &str) -> Result<(), StorageError> {
    let invalid = || StorageError::InvalidName {
        name: name.to_string(),
    };

    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains('\0') {
        return Err(invalid());
    }

    let mut components = std::path::Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(std::path::Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid()),
    }
}

/// Content type inferred from a file extension, for stores that do not
/// persist the declared type.
pub(crate) fn content_type_for_extension(name: &str) -> Option<String> {
    let ext = name.rsplit('.').next()?.to_ascii_lowercase();
    let ct = match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "csv" => "text/csv",
        "json" => "application/json",
        _ => return None,
    };
    Some(ct.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_document_name_accepts_plain_names() {
        assert!(validate_document_name("report.pdf").is_ok());
        assert!(validate_document_name("notes-2.txt").is_ok());
        assert!(validate_document_name("data set.csv").is_ok());
    }

    #[test]
    fn test_validate_document_name_rejects_traversal() {
        for name in [
            "",
            "..",
            ".",
            "../escape.txt",
            "..\\escape.txt",
            "sub/escape.txt",
            "/etc/passwd",
            "a\0b.txt",
        ] {
            let err = validate_document_name(name).unwrap_err();
            assert!(
                matches!(err, StorageError::InvalidName { .. }),
                "expected InvalidName for {:?}",
                name
            );
        }
    }

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(
            content_type_for_extension("a.pdf").as_deref(),
            Some("application/pdf")
        );
        assert_eq!(
            content_type_for_extension("notes.MD").as_deref(),
            Some("text/markdown")
        );
        assert_eq!(content_type_for_extension("binary.exe"), None);
        assert_eq!(content_type_for_extension("noext"), None);
    }
}
