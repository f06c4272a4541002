use std::collections::{HashMap, VecDeque};

use snafu::{OptionExt, ensure};

use super::error::{ConflictSnafu, InvariantViolationSnafu, NotFoundSnafu, StoreResult};
use super::ids::{ConversationId, MessageId};
use super::types::{Conversation, Message, NewConversation, NewMessage};
use super::{ConversationStore, MessageStore};

/// Session-scoped storage backend. Nothing is written anywhere; dropping the
/// value drops every conversation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    conversations: HashMap<ConversationId, Conversation>,
    // Newest conversation first.
    order: VecDeque<ConversationId>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for MemoryStorage {
    fn create_conversation(&mut self, input: NewConversation) -> StoreResult<&Conversation> {
        ensure!(
            !self.conversations.contains_key(&input.id),
            ConflictSnafu {
                stage: "conversation-create",
                entity: "conversation",
                details: format!("conversation id '{}' already exists", input.id),
            }
        );
        ensure!(
            !input.seed.content.trim().is_empty(),
            InvariantViolationSnafu {
                stage: "conversation-create-seed",
                details: "conversation seed message must not be empty".to_string(),
            }
        );

        let id = input.id.clone();
        let mut conversation = Conversation::new(input.id, input.title, input.is_predefined);
        conversation.push(Message {
            id: MessageId::new_v7(),
            role: input.seed.role,
            content: input.seed.content,
        });

        self.order.push_front(id.clone());
        Ok(&*self.conversations.entry(id).or_insert(conversation))
    }

    fn get_conversation(&self, conversation_id: &ConversationId) -> Option<&Conversation> {
        self.conversations.get(conversation_id)
    }

    fn list_conversations(&self) -> Vec<&Conversation> {
        self.order
            .iter()
            .filter_map(|id| self.conversations.get(id))
            .collect()
    }

    fn conversation_count(&self) -> usize {
        self.conversations.len()
    }
}

impl MessageStore for MemoryStorage {
    fn append_message(
        &mut self,
        conversation_id: &ConversationId,
        input: NewMessage,
    ) -> StoreResult<Message> {
        ensure!(
            !input.content.trim().is_empty(),
            InvariantViolationSnafu {
                stage: "message-append-content",
                details: format!("empty {} message", input.role.as_str()),
            }
        );

        let conversation =
            self.conversations
                .get_mut(conversation_id)
                .context(NotFoundSnafu {
                    stage: "message-append-load-conversation",
                    entity: "conversation",
                    id: conversation_id.to_string(),
                })?;

        let message = Message {
            id: MessageId::new_v7(),
            role: input.role,
            content: input.content,
        };
        conversation.push(message.clone());
        Ok(message)
    }

    fn list_messages(&self, conversation_id: &ConversationId) -> StoreResult<&[Message]> {
        self.conversations
            .get(conversation_id)
            .map(Conversation::messages)
            .context(NotFoundSnafu {
                stage: "message-list-load-conversation",
                entity: "conversation",
                id: conversation_id.to_string(),
            })
    }
}
