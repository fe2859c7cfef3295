//! Filesystem Document Store
//!
//! Documents live under `<root>/<brain_id>/<name>`. Writes go through a
//! staging file in the same directory and are renamed into place, so a
//! crashed or failed upload never leaves a partial document visible.
//! Staging files are removed on both success and failure.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use synapse_core::{new_entity_id, BrainId, DocumentMeta, EntityKind, StorageError};
use tracing::warn;

use super::{content_type_for_extension, validate_document_name, DocumentStore, StoreResult};

const STAGING_PREFIX: &str = ".staging-";

/// Document store backed by a directory tree.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn brain_dir(&self, brain_id: BrainId) -> PathBuf {
        self.root.join(brain_id.to_string())
    }

    fn io_err(path: &Path, err: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    fn meta_from_fs(path: &Path, name: &str, brain_id: BrainId) -> StoreResult<DocumentMeta> {
        let fs_meta = std::fs::metadata(path).map_err(|e| Self::io_err(path, e))?;
        let modified: DateTime<Utc> = fs_meta
            .modified()
            .map(DateTime::from)
            .unwrap_or_else(|_| Utc::now());
        // Creation time is not available on all filesystems
        let created: DateTime<Utc> = fs_meta
            .created()
            .map(DateTime::from)
            .unwrap_or(modified);

        Ok(DocumentMeta {
            name: name.to_string(),
            size: fs_meta.len(),
            content_type: content_type_for_extension(name),
            created_at: created,
            modified_at: modified,
            path: format!("{}/{}", brain_id, name),
        })
    }
}

#[async_trait]
impl DocumentStore for FsDocumentStore {
    async fn put(
        &self,
        brain_id: BrainId,
        name: &str,
        _content_type: Option<&str>,
        bytes: &[u8],
    ) -> StoreResult<DocumentMeta> {
        validate_document_name(name)?;
        let dir = self.brain_dir(brain_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| Self::io_err(&dir, e))?;

        let target = dir.join(name);
        if tokio::fs::try_exists(&target)
            .await
            .map_err(|e| Self::io_err(&target, e))?
        {
            return Err(StorageError::AlreadyExists {
                kind: EntityKind::Document,
                id: name.to_string(),
            });
        }

        // Stage, then rename into place
        let staging = dir.join(format!("{}{}", STAGING_PREFIX, new_entity_id()));
        if let Err(e) = tokio::fs::write(&staging, bytes).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(Self::io_err(&staging, e));
        }
        if let Err(e) = tokio::fs::rename(&staging, &target).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(Self::io_err(&target, e));
        }

        Self::meta_from_fs(&target, name, brain_id)
    }

    async fn get(&self, brain_id: BrainId, name: &str) -> StoreResult<(DocumentMeta, Vec<u8>)> {
        validate_document_name(name)?;
        let path = self.brain_dir(brain_id).join(name);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound {
                    kind: EntityKind::Document,
                    id: name.to_string(),
                }
            } else {
                Self::io_err(&path, e)
            }
        })?;
        let meta = Self::meta_from_fs(&path, name, brain_id)?;
        Ok((meta, bytes))
    }

    async fn list(&self, brain_id: BrainId) -> StoreResult<Vec<DocumentMeta>> {
        let dir = self.brain_dir(brain_id);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_err(&dir, e)),
        };

        let mut docs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Self::io_err(&dir, e))?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(STAGING_PREFIX) {
                // Leftover from an interrupted write; clean it up
                warn!(path = %entry.path().display(), "removing stale staging file");
                let _ = tokio::fs::remove_file(entry.path()).await;
                continue;
            }
            docs.push(Self::meta_from_fs(&entry.path(), &name, brain_id)?);
        }

        // Directory order is platform-dependent; oldest first
        docs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.name.cmp(&b.name)));
        Ok(docs)
    }

    async fn delete(&self, brain_id: BrainId, name: &str) -> StoreResult<()> {
        validate_document_name(name)?;
        let path = self.brain_dir(brain_id).join(name);
        tokio::fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound {
                    kind: EntityKind::Document,
                    id: name.to_string(),
                }
            } else {
                Self::io_err(&path, e)
            }
        })
    }

    async fn delete_all(&self, brain_id: BrainId) -> StoreResult<()> {
        let dir = self.brain_dir(brain_id);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_err(&dir, e)),
        }
    }

    async fn exists(&self, brain_id: BrainId, name: &str) -> StoreResult<bool> {
        validate_document_name(name)?;
        let path = self.brain_dir(brain_id).join(name);
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| Self::io_err(&path, e))
    }
}
