//! Gateway Services
//!
//! Business logic between the routes and the store/engine seams:
//! - `registry` - brain lifecycle and the document_count invariant
//! - `documents` - upload validation, collision handling, engine signaling
//! - `conversations` - transcripts and context composition
//! - `query` - synchronous query execution with engine timeout
//! - `streaming` - the ordered event protocol for streamed queries
//! - `templates` - the predefined brain configuration catalog

use dashmap::DashMap;
use std::sync::Arc;
use synapse_core::BrainId;
use tokio::sync::{Mutex, OwnedMutexGuard};

pub mod conversations;
pub mod documents;
pub mod query;
pub mod registry;
pub mod streaming;
pub mod templates;

pub use conversations::ConversationManager;
pub use documents::{DocumentService, UploadFile};
pub use query::QueryExecutor;
pub use registry::BrainRegistry;
pub use streaming::StreamOrchestrator;
pub use templates::{find_template, BrainTemplate, BRAIN_TEMPLATES};

/// Per-brain mutation locks.
///
/// Document and cascade mutations for one brain are serialized through its
/// lock; queries never take it, so reads stay unconstrained.
#[derive(Debug, Clone, Default)]
pub struct BrainLocks {
    inner: Arc<DashMap<BrainId, Arc<Mutex<()>>>>,
}

impl BrainLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the mutation lock for a brain, creating it on first use.
    pub async fn acquire(&self, brain_id: BrainId) -> OwnedMutexGuard<()> {
        let lock = self
            .inner
            .entry(brain_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Drop a brain's lock entry after the brain is deleted.
    pub fn discard(&self, brain_id: BrainId) {
        self.inner.remove(&brain_id);
    }
}
