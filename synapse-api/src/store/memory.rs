//! In-Memory Document Store
//!
//! Used by tests and by deployments that do not need documents to survive a
//! restart. Preserves insertion order per brain.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;
use synapse_core::{BrainId, DocumentMeta, EntityKind, StorageError};

use super::{validate_document_name, DocumentStore, StoreResult};

#[derive(Debug, Clone)]
struct StoredDocument {
    meta: DocumentMeta,
    bytes: Vec<u8>,
}

/// In-memory document store. Insertion order is list order.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<HashMap<BrainId, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(
        &self,
        brain_id: BrainId,
        name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> StoreResult<DocumentMeta> {
        validate_document_name(name)?;
        let mut map = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        let docs = map.entry(brain_id).or_default();

        if docs.iter().any(|d| d.meta.name == name) {
            return Err(StorageError::AlreadyExists {
                kind: EntityKind::Document,
                id: name.to_string(),
            });
        }

        let now = Utc::now();
        let meta = DocumentMeta {
            name: name.to_string(),
            size: bytes.len() as u64,
            content_type: content_type.map(|s| s.to_string()),
            created_at: now,
            modified_at: now,
            path: format!("{}/{}", brain_id, name),
        };
        docs.push(StoredDocument {
            meta: meta.clone(),
            bytes: bytes.to_vec(),
        });
        Ok(meta)
    }

    async fn get(&self, brain_id: BrainId, name: &str) -> StoreResult<(DocumentMeta, Vec<u8>)> {
        let map = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        map.get(&brain_id)
            .and_then(|docs| docs.iter().find(|d| d.meta.name == name))
            .map(|d| (d.meta.clone(), d.bytes.clone()))
            .ok_or_else(|| StorageError::NotFound {
                kind: EntityKind::Document,
                id: name.to_string(),
            })
    }

    async fn list(&self, brain_id: BrainId) -> StoreResult<Vec<DocumentMeta>> {
        let map = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(map
            .get(&brain_id)
            .map(|docs| docs.iter().map(|d| d.meta.clone()).collect())
            .unwrap_or_default())
    }

    async fn delete(&self, brain_id: BrainId, name: &str) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        let docs = map.get_mut(&brain_id).ok_or_else(|| StorageError::NotFound {
            kind: EntityKind::Document,
            id: name.to_string(),
        })?;

        let before = docs.len();
        docs.retain(|d| d.meta.name != name);
        if docs.len() == before {
            return Err(StorageError::NotFound {
                kind: EntityKind::Document,
                id: name.to_string(),
            });
        }
        Ok(())
    }

    async fn delete_all(&self, brain_id: BrainId) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| StorageError::LockPoisoned)?;
        map.remove(&brain_id);
        Ok(())
    }

    async fn exists(&self, brain_id: BrainId, name: &str) -> StoreResult<bool> {
        let map = self.inner.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(map
            .get(&brain_id)
            .map(|docs| docs.iter().any(|d| d.meta.name == name))
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synapse_core::new_entity_id;

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let store = MemoryDocumentStore::new();
        let brain_id = new_entity_id();

        let meta = store
            .put(brain_id, "a.txt", Some("text/plain"), b"hello")
            .await
            .unwrap();
        assert_eq!(meta.size, 5);

        let (fetched, bytes) = store.get(brain_id, "a.txt").await.unwrap();
        assert_eq!(fetched.name, "a.txt");
        assert_eq!(bytes, b"hello");
    }

    #[tokio::test]
    async fn test_put_refuses_overwrite() {
        let store = MemoryDocumentStore::new();
        let brain_id = new_entity_id();
        store.put(brain_id, "a.txt", None, b"1").await.unwrap();

        let err = store.put(brain_id, "a.txt", None, b"2").await.unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists { .. }));

        // Original bytes untouched
        let (_, bytes) = store.get(brain_id, "a.txt").await.unwrap();
        assert_eq!(bytes, b"1");
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryDocumentStore::new();
        let brain_id = new_entity_id();
        for name in ["c.txt", "a.txt", "b.txt"] {
            store.put(brain_id, name, None, b"x").await.unwrap();
        }

        let names: Vec<String> = store
            .list(brain_id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, vec!["c.txt", "a.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let store = MemoryDocumentStore::new();
        let brain_id = new_entity_id();
        let err = store.delete(brain_id, "ghost.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_put_rejects_traversal_names() {
        let store = MemoryDocumentStore::new();
        let brain_id = new_entity_id();
        let err = store
            .put(brain_id, "../escape.txt", None, b"x")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidName { .. }));
        assert!(store.list(brain_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_is_idempotent() {
        let store = MemoryDocumentStore::new();
        let brain_id = new_entity_id();
        store.put(brain_id, "a.txt", None, b"x").await.unwrap();

        store.delete_all(brain_id).await.unwrap();
        store.delete_all(brain_id).await.unwrap();
        assert!(store.list(brain_id).await.unwrap().is_empty());
    }
}
