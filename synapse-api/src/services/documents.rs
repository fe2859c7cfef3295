//! Document Service
//!
//! Upload validation, collision-safe persistence, and engine signaling.
//! A batch is all-or-nothing: one invalid or unpersistable file fails the
//! whole upload and nothing is kept, so the document_count invariant holds
//! across failures.

use std::sync::Arc;
use synapse_core::{limits, BrainId, DocumentMeta};
use synapse_engine::{IndexDocument, RetrievalEngine};
use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::services::{BrainLocks, BrainRegistry};
use crate::store::{validate_document_name, DocumentStore};
use crate::validation::ValidateNonEmpty;

/// One file extracted from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Document operations for a brain, bridging the store and the engine.
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
    registry: Arc<BrainRegistry>,
    engine: Arc<dyn RetrievalEngine>,
    locks: BrainLocks,
}

impl DocumentService {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        registry: Arc<BrainRegistry>,
        engine: Arc<dyn RetrievalEngine>,
        locks: BrainLocks,
    ) -> Self {
        Self {
            store,
            registry,
            engine,
            locks,
        }
    }

    /// Upload a batch of files into a brain.
    ///
    /// Validates every file before persisting any. On success all files are
    /// stored (with collision-suffixed names where needed), the brain's
    /// document count is bumped by the batch size, and the engine indexes
    /// the new content.
    pub async fn upload(
        &self,
        brain_id: BrainId,
        files: Vec<UploadFile>,
    ) -> ApiResult<(Vec<DocumentMeta>, i64)> {
        self.registry.get(brain_id)?;
        validate_batch(&files)?;

        let _guard = self.locks.acquire(brain_id).await;
        // Brain may have been deleted while waiting on the lock
        self.registry.get(brain_id)?;

        let mut persisted: Vec<DocumentMeta> = Vec::with_capacity(files.len());
        let mut indexable: Vec<IndexDocument> = Vec::with_capacity(files.len());

        for file in &files {
            let name = self.unique_name(brain_id, &file.name).await?;
            match self
                .store
                .put(brain_id, &name, file.content_type.as_deref(), &file.bytes)
                .await
            {
                Ok(meta) => {
                    indexable.push(IndexDocument {
                        name: meta.name.clone(),
                        bytes: file.bytes.clone(),
                    });
                    persisted.push(meta);
                }
                Err(err) => {
                    self.rollback(brain_id, &persisted).await;
                    return Err(ApiError::from(err));
                }
            }
        }

        let brain = self
            .registry
            .record_document_change(brain_id, persisted.len() as i64)?;
        self.engine.index(brain_id, &indexable).await?;

        info!(
            brain_id = %brain_id,
            files = persisted.len(),
            document_count = brain.document_count,
            "documents uploaded"
        );
        Ok((persisted, brain.document_count))
    }

    /// List a brain's documents.
    pub async fn list(&self, brain_id: BrainId) -> ApiResult<Vec<DocumentMeta>> {
        self.registry.get(brain_id)?;
        Ok(self.store.list(brain_id).await?)
    }

    /// Fetch one document's metadata.
    pub async fn get(&self, brain_id: BrainId, name: &str) -> ApiResult<DocumentMeta> {
        self.registry.get(brain_id)?;
        validate_document_name(name)?;
        let (meta, _bytes) = self.store.get(brain_id, name).await?;
        Ok(meta)
    }

    /// Delete one document, decrement the count, and reindex the survivors
    /// so the deleted content can no longer be retrieved.
    pub async fn delete(&self, brain_id: BrainId, name: &str) -> ApiResult<()> {
        self.registry.get(brain_id)?;
        validate_document_name(name)?;

        let _guard = self.locks.acquire(brain_id).await;
        self.registry.get(brain_id)?;

        self.store.delete(brain_id, name).await?;
        self.registry.record_document_change(brain_id, -1)?;

        let survivors = self.surviving_documents(brain_id).await?;
        self.engine.reindex(brain_id, &survivors).await?;

        info!(brain_id = %brain_id, name = %name, "document deleted");
        Ok(())
    }

    /// Remove all documents and indexed state for a brain. Part of the
    /// brain delete cascade; the caller holds the brain lock.
    pub async fn delete_all(&self, brain_id: BrainId) -> ApiResult<()> {
        self.store.delete_all(brain_id).await?;
        self.engine.remove(brain_id).await?;
        Ok(())
    }

    /// Resolve a name collision by suffixing: `report.pdf` becomes
    /// `report-1.pdf`, `report-2.pdf`, ... Never overwrites.
    async fn unique_name(&self, brain_id: BrainId, name: &str) -> ApiResult<String> {
        if !self.store.exists(brain_id, name).await? {
            return Ok(name.to_string());
        }

        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (name, None),
        };

        for i in 1.. {
            let candidate = match ext {
                Some(ext) => format!("{}-{}.{}", stem, i, ext),
                None => format!("{}-{}", stem, i),
            };
            if !self.store.exists(brain_id, &candidate).await? {
                return Ok(candidate);
            }
        }
        unreachable!("suffix search is unbounded")
    }

    /// Current document set with bytes, for reindexing.
    async fn surviving_documents(&self, brain_id: BrainId) -> ApiResult<Vec<IndexDocument>> {
        let metas = self.store.list(brain_id).await?;
        let mut docs = Vec::with_capacity(metas.len());
        for meta in metas {
            let (_, bytes) = self.store.get(brain_id, &meta.name).await?;
            docs.push(IndexDocument {
                name: meta.name,
                bytes,
            });
        }
        Ok(docs)
    }

    /// Undo partially persisted files from a failed batch.
    async fn rollback(&self, brain_id: BrainId, persisted: &[DocumentMeta]) {
        for meta in persisted {
            if let Err(err) = self.store.delete(brain_id, &meta.name).await {
                warn!(brain_id = %brain_id, name = %meta.name, error = %err, "rollback delete failed");
            }
        }
    }
}

/// Validate an upload batch without touching storage.
fn validate_batch(files: &[UploadFile]) -> ApiResult<()> {
    if files.is_empty() {
        return Err(ApiError::validation_failed("No files provided"));
    }
    if files.len() > limits::MAX_UPLOAD_FILES {
        return Err(ApiError::invalid_range(
            "files",
            1,
            limits::MAX_UPLOAD_FILES,
        ));
    }

    for file in files {
        file.name.validate_non_empty("filename")?;
        // Names become path segments on disk; traversal sequences are rejected
        if validate_document_name(&file.name).is_err() {
            return Err(ApiError::validation_failed(format!(
                "Invalid filename: {}",
                file.name
            )));
        }

        let ext = file
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        let ext_ok = ext
            .as_deref()
            .map(|e| limits::ALLOWED_EXTENSIONS.contains(&e))
            .unwrap_or(false);
        if !ext_ok {
            return Err(ApiError::validation_failed(format!(
                "File type not allowed: {}",
                file.name
            )));
        }

        if let Some(ct) = &file.content_type {
            if !limits::ALLOWED_CONTENT_TYPES.contains(&ct.as_str()) {
                return Err(ApiError::validation_failed(format!(
                    "Content type '{}' not allowed for file: {}",
                    ct, file.name
                )));
            }
        }

        if file.bytes.len() as u64 > limits::MAX_UPLOAD_FILE_BYTES {
            return Err(ApiError::validation_failed(format!(
                "File too large (max {}MB): {}",
                limits::MAX_UPLOAD_FILE_BYTES / (1024 * 1024),
                file.name
            )));
        }
    }
    Ok(())
}
