//! Brain Registry
//!
//! The authoritative table of brains. Owns creation-time validation and the
//! document_count invariant: the count must equal the number of stored
//! documents at all observable times, and it can never go negative.

use std::sync::RwLock;
use synapse_core::{limits, Brain, BrainId, LlmProvider, StorageError};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::types::CreateBrainRequest;
use crate::validation::{ValidateLength, ValidateNonEmpty};

/// In-memory brain table, creation order preserved.
#[derive(Debug, Default)]
pub struct BrainRegistry {
    brains: RwLock<Vec<Brain>>,
}

impl BrainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a brain. Validates all fields before allocating anything.
    pub fn create(&self, req: &CreateBrainRequest) -> ApiResult<Brain> {
        req.name.validate_non_empty("name")?;
        req.name
            .validate_char_len("name", 1, limits::MAX_BRAIN_NAME_LEN)?;
        if let Some(description) = &req.description {
            description.validate_char_len("description", 0, limits::MAX_BRAIN_DESCRIPTION_LEN)?;
        }
        if let Some(model) = &req.model {
            model.validate_non_empty("model")?;
        }

        let brain = Brain::new(
            req.name.trim(),
            req.description.clone(),
            req.llm_provider.unwrap_or(LlmProvider::Anthropic),
            req.model.clone(),
        );

        let mut brains = self.write()?;
        brains.push(brain.clone());
        info!(brain_id = %brain.id, name = %brain.name, "brain created");
        Ok(brain)
    }

    /// Fetch a brain by id.
    pub fn get(&self, brain_id: BrainId) -> ApiResult<Brain> {
        self.read()?
            .iter()
            .find(|b| b.id == brain_id)
            .cloned()
            .ok_or_else(|| ApiError::brain_not_found(brain_id))
    }

    /// All brains in creation order.
    pub fn list(&self) -> ApiResult<Vec<Brain>> {
        Ok(self.read()?.clone())
    }

    /// Remove a brain from the registry, returning it. This is the last step
    /// of the delete cascade; children must already be gone.
    pub fn remove(&self, brain_id: BrainId) -> ApiResult<Brain> {
        let mut brains = self.write()?;
        let idx = brains
            .iter()
            .position(|b| b.id == brain_id)
            .ok_or_else(|| ApiError::brain_not_found(brain_id))?;
        let brain = brains.remove(idx);
        info!(brain_id = %brain.id, "brain deleted");
        Ok(brain)
    }

    /// Atomically adjust a brain's document count and bump updated_at.
    /// A delta that would drive the count negative is refused.
    pub fn record_document_change(&self, brain_id: BrainId, delta: i64) -> ApiResult<Brain> {
        let mut brains = self.write()?;
        let brain = brains
            .iter_mut()
            .find(|b| b.id == brain_id)
            .ok_or_else(|| ApiError::brain_not_found(brain_id))?;

        let next = brain.document_count + delta;
        if next < 0 {
            return Err(StorageError::NegativeDocumentCount {
                brain_id: brain_id.to_string(),
            }
            .into());
        }
        brain.document_count = next;
        brain.updated_at = chrono::Utc::now();
        Ok(brain.clone())
    }

    fn read(&self) -> ApiResult<std::sync::RwLockReadGuard<'_, Vec<Brain>>> {
        self.brains
            .read()
            .map_err(|_| ApiError::internal_error("brain registry lock poisoned"))
    }

    fn write(&self) -> ApiResult<std::sync::RwLockWriteGuard<'_, Vec<Brain>>> {
        self.brains
            .write()
            .map_err(|_| ApiError::internal_error("brain registry lock poisoned"))
    }
}
