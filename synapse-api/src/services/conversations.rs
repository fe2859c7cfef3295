//! Conversation Manager
//!
//! Conversation lifecycle and the context composition rules for
//! conversation-scoped queries. Transcripts are append-only; the only ways
//! to shrink one are `clear_messages` and deleting the conversation.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::Arc;
use synapse_core::{
    limits, Brain, ContextMessage, Conversation, ConversationId, BrainId, Message, MessageRole,
};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::services::BrainRegistry;
use crate::types::CreateConversationRequest;
use crate::validation::{ValidateLength, ValidateNonEmpty, ValidateRange};

/// Everything a query execution needs from a conversation, captured at the
/// moment the query began: the owning brain and the prior turns.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub brain: Brain,
    pub context: Vec<ContextMessage>,
}

/// In-memory conversation table keyed by id.
pub struct ConversationManager {
    conversations: RwLock<HashMap<ConversationId, Conversation>>,
    registry: Arc<BrainRegistry>,
}

impl ConversationManager {
    pub fn new(registry: Arc<BrainRegistry>) -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
            registry,
        }
    }

    /// Create a conversation scoped to a live brain.
    pub fn create(&self, req: &CreateConversationRequest) -> ApiResult<Conversation> {
        self.registry.get(req.brain_id)?;
        if let Some(title) = &req.title {
            title.validate_non_empty("title")?;
            title.validate_char_len("title", 1, limits::MAX_CONVERSATION_TITLE_LEN)?;
        }

        let conversation = Conversation::new(req.brain_id, req.title.clone());
        let mut map = self.write()?;
        map.insert(conversation.id, conversation.clone());
        info!(conversation_id = %conversation.id, brain_id = %req.brain_id, "conversation created");
        Ok(conversation)
    }

    /// Fetch a conversation by id.
    pub fn get(&self, conversation_id: ConversationId) -> ApiResult<Conversation> {
        self.read()?
            .get(&conversation_id)
            .cloned()
            .ok_or_else(|| ApiError::conversation_not_found(conversation_id))
    }

    /// List conversations, optionally filtered by brain, most recently
    /// updated first.
    pub fn list(&self, brain_id: Option<BrainId>) -> ApiResult<Vec<Conversation>> {
        let map = self.read()?;
        let mut conversations: Vec<Conversation> = map
            .values()
            .filter(|c| brain_id.map(|id| c.brain_id == id).unwrap_or(true))
            .cloned()
            .collect();
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(conversations)
    }

    /// Append a message to a transcript.
    pub fn add_message(
        &self,
        conversation_id: ConversationId,
        role: MessageRole,
        content: &str,
        sources: Option<Vec<String>>,
    ) -> ApiResult<Message> {
        content.validate_non_empty("content")?;
        content.validate_char_len("content", 1, limits::MAX_MESSAGE_CONTENT_LEN)?;

        let mut map = self.write()?;
        let conversation = map
            .get_mut(&conversation_id)
            .ok_or_else(|| ApiError::conversation_not_found(conversation_id))?;
        Ok(conversation.add_message(role, content, sources))
    }

    /// Rename a conversation.
    pub fn update_title(
        &self,
        conversation_id: ConversationId,
        title: &str,
    ) -> ApiResult<Conversation> {
        title.validate_non_empty("title")?;
        title.validate_char_len("title", 1, limits::MAX_CONVERSATION_TITLE_LEN)?;

        let mut map = self.write()?;
        let conversation = map
            .get_mut(&conversation_id)
            .ok_or_else(|| ApiError::conversation_not_found(conversation_id))?;
        conversation.title = title.trim().to_string();
        conversation.updated_at = chrono::Utc::now();
        Ok(conversation.clone())
    }

    /// Empty a transcript without deleting the conversation.
    pub fn clear_messages(&self, conversation_id: ConversationId) -> ApiResult<()> {
        let mut map = self.write()?;
        let conversation = map
            .get_mut(&conversation_id)
            .ok_or_else(|| ApiError::conversation_not_found(conversation_id))?;
        conversation.clear_messages();
        Ok(())
    }

    /// Delete a conversation.
    pub fn delete(&self, conversation_id: ConversationId) -> ApiResult<()> {
        let mut map = self.write()?;
        map.remove(&conversation_id)
            .map(|_| ())
            .ok_or_else(|| ApiError::conversation_not_found(conversation_id))
    }

    /// Delete every conversation belonging to a brain. First step of the
    /// brain delete cascade.
    pub fn delete_for_brain(&self, brain_id: BrainId) -> ApiResult<usize> {
        let mut map = self.write()?;
        let before = map.len();
        map.retain(|_, c| c.brain_id != brain_id);
        Ok(before - map.len())
    }

    /// Start a conversation-scoped query: capture the prior turns as engine
    /// context, then append the user's question. Explicitly non-idempotent;
    /// an engine failure after this point still leaves the question in the
    /// transcript.
    pub fn begin_query(
        &self,
        conversation_id: ConversationId,
        question: &str,
        max_context_messages: usize,
    ) -> ApiResult<QueryContext> {
        max_context_messages.validate_range(
            "max_context_messages",
            1,
            limits::MAX_CONTEXT_MESSAGES,
        )?;

        let mut map = self.write()?;
        let conversation = map
            .get_mut(&conversation_id)
            .ok_or_else(|| ApiError::conversation_not_found(conversation_id))?;
        let brain = self.registry.get(conversation.brain_id)?;

        // Preconditions before any mutation
        if brain.document_count == 0 {
            return Err(ApiError::empty_brain());
        }

        let context = conversation.context(max_context_messages);
        conversation.add_message(MessageRole::User, question, None);
        Ok(QueryContext { brain, context })
    }

    /// Finish a successful query by appending the assistant's answer.
    pub fn complete_query(
        &self,
        conversation_id: ConversationId,
        answer: &str,
        sources: Vec<String>,
    ) -> ApiResult<Message> {
        let mut map = self.write()?;
        let conversation = map
            .get_mut(&conversation_id)
            .ok_or_else(|| ApiError::conversation_not_found(conversation_id))?;
        Ok(conversation.add_message(MessageRole::Assistant, answer, Some(sources)))
    }

    fn read(
        &self,
    ) -> ApiResult<std::sync::RwLockReadGuard<'_, HashMap<ConversationId, Conversation>>> {
        self.conversations
            .read()
            .map_err(|_| ApiError::internal_error("conversation table lock poisoned"))
    }

    fn write(
        &self,
    ) -> ApiResult<std::sync::RwLockWriteGuard<'_, HashMap<ConversationId, Conversation>>> {
        self.conversations
            .write()
            .map_err(|_| ApiError::internal_error("conversation table lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::types::CreateBrainRequest;

    fn fixture() -> (Arc<BrainRegistry>, ConversationManager, Brain) {
        let registry = Arc::new(BrainRegistry::new());
        let brain = registry
            .create(&CreateBrainRequest {
                name: "Docs".to_string(),
                description: None,
                llm_provider: None,
                model: None,
            })
            .unwrap();
        let manager = ConversationManager::new(registry.clone());
        (registry, manager, brain)
    }

    fn create_req(brain_id: BrainId, title: Option<&str>) -> CreateConversationRequest {
        CreateConversationRequest {
            brain_id,
            title: title.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_create_requires_live_brain() {
        let (_registry, manager, _brain) = fixture();
        let err = manager
            .create(&create_req(synapse_core::new_entity_id(), None))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BrainNotFound);
    }

    #[test]
    fn test_create_with_default_title() {
        let (_registry, manager, brain) = fixture();
        let conv = manager.create(&create_req(brain.id, None)).unwrap();
        assert!(conv.title.starts_with("Conversation "));
    }

    #[test]
    fn test_add_message_validates_content() {
        let (_registry, manager, brain) = fixture();
        let conv = manager.create(&create_req(brain.id, None)).unwrap();

        assert!(manager
            .add_message(conv.id, MessageRole::User, "  ", None)
            .is_err());
        let long = "x".repeat(limits::MAX_MESSAGE_CONTENT_LEN + 1);
        assert!(manager
            .add_message(conv.id, MessageRole::User, &long, None)
            .is_err());
        assert!(manager
            .add_message(conv.id, MessageRole::User, "hello", None)
            .is_ok());
    }

    #[test]
    fn test_list_filters_by_brain_and_sorts_by_recency() {
        let (registry, manager, brain) = fixture();
        let other = registry
            .create(&CreateBrainRequest {
                name: "Other".to_string(),
                description: None,
                llm_provider: None,
                model: None,
            })
            .unwrap();

        let first = manager.create(&create_req(brain.id, Some("first"))).unwrap();
        let second = manager
            .create(&create_req(brain.id, Some("second")))
            .unwrap();
        manager.create(&create_req(other.id, Some("elsewhere"))).unwrap();

        // Touch the older conversation so it sorts first
        manager
            .add_message(first.id, MessageRole::User, "bump", None)
            .unwrap();

        let listed = manager.list(Some(brain.id)).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);
    }

    #[test]
    fn test_update_title_and_clear_messages() {
        let (_registry, manager, brain) = fixture();
        let conv = manager.create(&create_req(brain.id, Some("old"))).unwrap();
        manager
            .add_message(conv.id, MessageRole::User, "hi", None)
            .unwrap();

        let renamed = manager.update_title(conv.id, "new title").unwrap();
        assert_eq!(renamed.title, "new title");

        manager.clear_messages(conv.id).unwrap();
        let fetched = manager.get(conv.id).unwrap();
        assert!(fetched.messages.is_empty());
        assert_eq!(fetched.title, "new title");
    }

    #[test]
    fn test_delete_for_brain_cascade() {
        let (_registry, manager, brain) = fixture();
        manager.create(&create_req(brain.id, None)).unwrap();
        manager.create(&create_req(brain.id, None)).unwrap();

        let removed = manager.delete_for_brain(brain.id).unwrap();
        assert_eq!(removed, 2);
        assert!(manager.list(Some(brain.id)).unwrap().is_empty());
    }

    #[test]
    fn test_begin_query_rejects_empty_brain_without_mutation() {
        let (_registry, manager, brain) = fixture();
        let conv = manager.create(&create_req(brain.id, None)).unwrap();

        let err = manager.begin_query(conv.id, "question", 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyBrain);
        // Question was not appended
        assert!(manager.get(conv.id).unwrap().messages.is_empty());
    }

    #[test]
    fn test_begin_query_captures_prior_turns_then_appends_user() {
        let (registry, manager, brain) = fixture();
        registry.record_document_change(brain.id, 1).unwrap();
        let conv = manager.create(&create_req(brain.id, None)).unwrap();
        manager
            .add_message(conv.id, MessageRole::User, "Q1", None)
            .unwrap();
        manager
            .add_message(conv.id, MessageRole::Assistant, "A1", Some(vec![]))
            .unwrap();

        let ctx = manager.begin_query(conv.id, "Q2", 10).unwrap();
        assert_eq!(ctx.context.len(), 2);
        assert_eq!(ctx.context[0].content, "Q1");
        assert_eq!(ctx.context[1].content, "A1");

        let transcript = manager.get(conv.id).unwrap();
        assert_eq!(transcript.messages.len(), 3);
        assert_eq!(transcript.messages[2].content, "Q2");
    }

    #[test]
    fn test_begin_query_validates_context_window() {
        let (registry, manager, brain) = fixture();
        registry.record_document_change(brain.id, 1).unwrap();
        let conv = manager.create(&create_req(brain.id, None)).unwrap();

        assert!(manager.begin_query(conv.id, "q", 0).is_err());
        assert!(manager.begin_query(conv.id, "q", 51).is_err());
    }

    #[test]
    fn test_complete_query_appends_assistant_with_sources() {
        let (registry, manager, brain) = fixture();
        registry.record_document_change(brain.id, 1).unwrap();
        let conv = manager.create(&create_req(brain.id, None)).unwrap();

        manager.begin_query(conv.id, "Q", 10).unwrap();
        manager
            .complete_query(conv.id, "A", vec!["a.pdf".to_string()])
            .unwrap();

        let transcript = manager.get(conv.id).unwrap();
        assert_eq!(transcript.messages.len(), 2);
        assert_eq!(transcript.messages[1].role, MessageRole::Assistant);
        assert_eq!(
            transcript.messages[1].sources,
            Some(vec!["a.pdf".to_string()])
        );
    }
}
