use std::sync::Arc;

use agent_first_storage::{
    Conversation, ConversationId, ConversationSummary, MemoryStorage, MessageId, NewConversation,
    NewMessage, Storage, TopicCatalog,
};

/// Conversation set plus the "active" selection.
///
/// All mutation goes through the named operations below. Invalid input (blank
/// text, unknown topic, unknown conversation) is ignored rather than reported
/// as an error, so every operation returns a plain value describing the result.
pub struct ChatState<S = MemoryStorage> {
    storage: S,
    catalog: Arc<TopicCatalog>,
    active: Option<ConversationId>,
}

impl ChatState<MemoryStorage> {
    pub fn in_memory(catalog: Arc<TopicCatalog>) -> Self {
        Self::new(MemoryStorage::new(), catalog)
    }
}

impl<S: Storage> ChatState<S> {
    pub fn new(storage: S, catalog: Arc<TopicCatalog>) -> Self {
        Self {
            storage,
            catalog,
            active: None,
        }
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub fn active_conversation_id(&self) -> Option<&ConversationId> {
        self.active.as_ref()
    }

    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active
            .as_ref()
            .and_then(|id| self.storage.get_conversation(id))
    }

    pub fn conversation(&self, conversation_id: &ConversationId) -> Option<&Conversation> {
        self.storage.get_conversation(conversation_id)
    }

    pub fn conversation_count(&self) -> usize {
        self.storage.conversation_count()
    }

    /// Free-form conversations, newest first. Topic conversations never appear here.
    pub fn history(&self) -> Vec<ConversationSummary> {
        self.storage
            .list_conversations()
            .into_iter()
            .filter(|conversation| !conversation.is_predefined())
            .map(Conversation::summary)
            .collect()
    }

    /// Points the active selection at an existing conversation.
    ///
    /// An unknown id clears the selection and returns `false`.
    pub fn select_conversation(&mut self, conversation_id: &ConversationId) -> bool {
        if !self.storage.contains_conversation(conversation_id) {
            tracing::debug!(
                conversation_id = %conversation_id,
                "selected unknown conversation; clearing active selection"
            );
            self.active = None;
            return false;
        }

        if self.active.as_ref() != Some(conversation_id) {
            tracing::debug!(conversation_id = %conversation_id, "conversation selected");
            self.active = Some(conversation_id.clone());
        }
        true
    }

    /// Clears the selection. The next submitted message opens a new conversation.
    pub fn start_new_conversation(&mut self) {
        self.active = None;
    }

    /// Records a user message and returns the conversation it landed in.
    ///
    /// The text is trimmed first; blank input changes nothing and yields `None`.
    pub fn submit_user_message(&mut self, content: &str) -> Option<ConversationId> {
        let content = content.trim();
        if content.is_empty() {
            tracing::debug!("ignoring blank user message");
            return None;
        }

        let Some(conversation_id) = self.active.clone() else {
            return self.open_free_form(content);
        };

        match self
            .storage
            .append_message(&conversation_id, NewMessage::user(content))
        {
            Ok(message) => {
                tracing::debug!(
                    conversation_id = %conversation_id,
                    message_id = %message.id,
                    "user message appended"
                );
                Some(conversation_id)
            }
            Err(error) => {
                tracing::warn!(
                    conversation_id = %conversation_id,
                    error = %error,
                    "failed to append user message"
                );
                None
            }
        }
    }

    /// Appends an assistant reply; a vanished conversation is skipped.
    pub fn append_assistant_message(
        &mut self,
        conversation_id: &ConversationId,
        content: impl Into<String>,
    ) -> Option<MessageId> {
        match self
            .storage
            .append_message(conversation_id, NewMessage::assistant(content))
        {
            Ok(message) => Some(message.id),
            Err(error) => {
                tracing::warn!(
                    conversation_id = %conversation_id,
                    error = %error,
                    "dropping assistant message"
                );
                None
            }
        }
    }

    /// Opens the conversation for a catalog topic, creating it on first use.
    ///
    /// Re-activating a topic only selects the existing conversation. Ids that
    /// are not in the catalog are ignored.
    pub fn activate_topic(&mut self, topic_id: &str) -> Option<ConversationId> {
        let conversation_id = ConversationId::new(topic_id);
        if self.storage.contains_conversation(&conversation_id) {
            self.active = Some(conversation_id.clone());
            return Some(conversation_id);
        }

        let Some(topic) = self.catalog.get(topic_id) else {
            tracing::debug!(topic_id, "ignoring unknown topic");
            return None;
        };

        match self
            .storage
            .create_conversation(NewConversation::predefined(topic))
        {
            Ok(conversation) => {
                let id = conversation.id().clone();
                tracing::debug!(conversation_id = %id, "topic conversation created");
                self.active = Some(id.clone());
                Some(id)
            }
            Err(error) => {
                tracing::warn!(topic_id, error = %error, "failed to create topic conversation");
                None
            }
        }
    }

    fn open_free_form(&mut self, content: &str) -> Option<ConversationId> {
        match self
            .storage
            .create_conversation(NewConversation::free_form(content))
        {
            Ok(conversation) => {
                let id = conversation.id().clone();
                tracing::debug!(
                    conversation_id = %id,
                    title = conversation.title(),
                    "free-form conversation created"
                );
                self.active = Some(id.clone());
                Some(id)
            }
            Err(error) => {
                tracing::warn!(error = %error, "failed to create conversation");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use agent_first_storage::{ConversationStore, MessageRole, PRECOS_TOPIC_ID, SOBRE_TOPIC_ID};

    use super::*;

    fn state() -> ChatState {
        ChatState::in_memory(Arc::new(TopicCatalog::builtin()))
    }

    fn message_counts(state: &ChatState) -> Vec<usize> {
        state
            .storage
            .list_conversations()
            .into_iter()
            .map(|conversation| conversation.messages().len())
            .collect()
    }

    #[test]
    fn first_message_opens_titled_conversation() {
        let mut state = state();
        let text = "Como posso automatizar o estoque da minha loja?";

        let id = state.submit_user_message(text).expect("conversation id");

        assert_eq!(state.conversation_count(), 1);
        assert_eq!(state.active_conversation_id(), Some(&id));
        let conversation = state.conversation(&id).expect("conversation");
        assert_eq!(conversation.title(), "Como posso automatizar o estoq...");
        assert!(!conversation.is_predefined());
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].role, MessageRole::User);
        assert_eq!(conversation.messages()[0].content, text);
    }

    #[test]
    fn short_first_message_is_the_whole_title() {
        let mut state = state();
        let id = state.submit_user_message("Oi!").expect("conversation id");
        assert_eq!(state.conversation(&id).expect("conversation").title(), "Oi!");
    }

    #[test]
    fn submitted_text_is_trimmed() {
        let mut state = state();
        let id = state.submit_user_message("  olá  \n").expect("conversation id");
        let conversation = state.conversation(&id).expect("conversation");
        assert_eq!(conversation.title(), "olá");
        assert_eq!(conversation.messages()[0].content, "olá");
    }

    #[test]
    fn blank_submissions_change_nothing() {
        let mut state = state();
        state.submit_user_message("primeira").expect("conversation id");
        state.activate_topic(SOBRE_TOPIC_ID).expect("topic");
        let active_before = state.active_conversation_id().cloned();
        let counts_before = message_counts(&state);

        for blank in ["", "   ", "\n\t "] {
            assert_eq!(state.submit_user_message(blank), None);
        }
        assert!(active_before.is_some());
        assert_eq!(state.active_conversation_id().cloned(), active_before);
        assert_eq!(message_counts(&state), counts_before);

        state.start_new_conversation();
        assert_eq!(state.submit_user_message(" "), None);

        assert_eq!(state.conversation_count(), 2);
        assert_eq!(message_counts(&state), counts_before);
        assert_eq!(state.active_conversation_id(), None);
    }

    #[test]
    fn blank_submission_keeps_free_form_conversation_active() {
        let mut state = state();
        let id = state.submit_user_message("oi").expect("conversation id");

        assert_eq!(state.submit_user_message("  \t"), None);

        assert_eq!(state.active_conversation_id(), Some(&id));
        assert_eq!(state.conversation(&id).expect("conversation").messages().len(), 1);
    }

    #[test]
    fn title_is_not_recomputed_by_later_messages() {
        let mut state = state();
        let id = state.submit_user_message("oi").expect("conversation id");
        state
            .submit_user_message("uma mensagem bem mais longa que trinta caracteres")
            .expect("append");

        let conversation = state.conversation(&id).expect("conversation");
        assert_eq!(conversation.title(), "oi");
        assert_eq!(conversation.messages().len(), 2);
    }

    #[test]
    fn new_conversation_defers_creation_until_message() {
        let mut state = state();
        let first = state.submit_user_message("primeira").expect("first");

        state.start_new_conversation();
        assert_eq!(state.active_conversation_id(), None);
        assert_eq!(state.conversation_count(), 1);

        let second = state.submit_user_message("segunda").expect("second");
        assert_ne!(first, second);
        assert_eq!(state.conversation_count(), 2);
        let history = state.history();
        assert_eq!(history[0].id, second);
        assert_eq!(history[1].id, first);
    }

    #[test]
    fn activating_topic_twice_keeps_one_conversation() {
        let mut state = state();

        let first = state.activate_topic(SOBRE_TOPIC_ID).expect("first activation");
        assert_eq!(state.active_conversation_id().map(ConversationId::as_str), Some("sobre"));
        let second = state.activate_topic(SOBRE_TOPIC_ID).expect("second activation");
        assert_eq!(state.active_conversation_id().map(ConversationId::as_str), Some("sobre"));

        assert_eq!(first, second);
        assert_eq!(state.conversation_count(), 1);
        let conversation = state.conversation(&first).expect("conversation");
        assert!(conversation.is_predefined());
        assert_eq!(conversation.title(), "Sobre");
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].role, MessageRole::Assistant);
        assert_eq!(
            conversation.messages()[0].content,
            state.catalog().get(SOBRE_TOPIC_ID).expect("topic").initial_message
        );
    }

    #[test]
    fn reactivated_topic_keeps_its_messages() {
        let mut state = state();
        let id = state.activate_topic(PRECOS_TOPIC_ID).expect("topic");
        state.submit_user_message("quanto custa?").expect("append");
        state.start_new_conversation();

        state.activate_topic(PRECOS_TOPIC_ID).expect("topic again");
        assert_eq!(state.conversation(&id).expect("conversation").messages().len(), 2);
    }

    #[test]
    fn unknown_topic_is_ignored() {
        let mut state = state();
        let id = state.submit_user_message("oi").expect("conversation id");

        assert_eq!(state.activate_topic("contato"), None);
        assert_eq!(state.conversation_count(), 1);
        assert_eq!(state.active_conversation_id(), Some(&id));
    }

    #[test]
    fn history_excludes_topic_conversations() {
        let mut state = state();
        state.activate_topic(SOBRE_TOPIC_ID).expect("topic");
        state.start_new_conversation();
        let free = state.submit_user_message("livre").expect("free");
        state.activate_topic(PRECOS_TOPIC_ID).expect("topic");

        let history = state.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, free);
        assert_eq!(history[0].title, "livre");
    }

    #[test]
    fn selecting_unknown_conversation_clears_active() {
        let mut state = state();
        state.submit_user_message("oi").expect("conversation id");

        assert!(!state.select_conversation(&ConversationId::from("nao-existe")));
        assert_eq!(state.active_conversation_id(), None);
        assert_eq!(state.conversation_count(), 1);
    }

    #[test]
    fn reselecting_active_conversation_is_noop() {
        let mut state = state();
        let first = state.submit_user_message("primeira").expect("first");
        state.start_new_conversation();
        let second = state.submit_user_message("segunda").expect("second");
        let history_before = state.history();
        let counts_before = message_counts(&state);

        assert!(state.select_conversation(&second));
        assert!(state.select_conversation(&second));

        assert_eq!(state.active_conversation_id(), Some(&second));
        assert_eq!(state.history(), history_before);
        assert_eq!(message_counts(&state), counts_before);

        assert!(state.select_conversation(&first));
        assert_eq!(state.history(), history_before);
    }

    #[test]
    fn message_goes_to_selected_conversation() {
        let mut state = state();
        let first = state.submit_user_message("primeira").expect("first");
        state.start_new_conversation();
        state.submit_user_message("segunda").expect("second");

        state.select_conversation(&first);
        assert_eq!(state.submit_user_message("de volta"), Some(first.clone()));
        assert_eq!(state.conversation(&first).expect("conversation").messages().len(), 2);
    }

    #[test]
    fn assistant_message_to_missing_conversation_is_skipped() {
        let mut state = state();
        assert_eq!(
            state.append_assistant_message(&ConversationId::from("sumiu"), "resposta"),
            None
        );
        assert_eq!(state.conversation_count(), 0);
    }
}
