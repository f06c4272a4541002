pub mod catalog;
pub mod error;
pub mod ids;
pub mod memory;
pub mod types;

pub use catalog::{
    AGENTS_TOPIC_ID, APRENDA_TOPIC_ID, PRECOS_TOPIC_ID, SOBRE_TOPIC_ID, TopicCatalog, TopicRecord,
};
pub use error::{StoreError, StoreResult};
pub use ids::{ConversationId, MessageId};
pub use memory::MemoryStorage;
pub use types::{
    Conversation, ConversationSummary, Message, MessageRole, NewConversation, NewMessage,
    TITLE_MAX_CHARS, TITLE_TRUNCATION_MARKER, derive_title,
};

pub trait ConversationStore {
    fn create_conversation(&mut self, input: NewConversation) -> StoreResult<&Conversation>;
    fn get_conversation(&self, conversation_id: &ConversationId) -> Option<&Conversation>;
    /// Newest first.
    fn list_conversations(&self) -> Vec<&Conversation>;
    fn conversation_count(&self) -> usize;

    fn contains_conversation(&self, conversation_id: &ConversationId) -> bool {
        self.get_conversation(conversation_id).is_some()
    }
}

pub trait MessageStore {
    fn append_message(
        &mut self,
        conversation_id: &ConversationId,
        input: NewMessage,
    ) -> StoreResult<Message>;
    fn list_messages(&self, conversation_id: &ConversationId) -> StoreResult<&[Message]>;
}

pub trait Storage: ConversationStore + MessageStore + Send + Sync {}

impl<T> Storage for T where T: ConversationStore + MessageStore + Send + Sync {}
