use super::catalog::TopicRecord;
use super::ids::{ConversationId, MessageId};

/// Number of characters of the first message kept in a free-form title.
pub const TITLE_MAX_CHARS: usize = 30;
/// Appended to a derived title when the first message was longer than the limit.
pub const TITLE_TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One immutable chat message. Only the owning conversation hands these out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub role: MessageRole,
    pub content: String,
}

impl NewMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Conversation aggregate. Messages are append-only and `is_predefined` is fixed
/// at creation, so every field is private and mutation goes through the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    id: ConversationId,
    title: String,
    messages: Vec<Message>,
    is_predefined: bool,
}

impl Conversation {
    pub(crate) fn new(id: ConversationId, title: String, is_predefined: bool) -> Self {
        Self {
            id,
            title,
            messages: Vec::new(),
            is_predefined,
        }
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_predefined(&self) -> bool {
        self.is_predefined
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// Input for creating a conversation together with its seed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewConversation {
    pub id: ConversationId,
    pub title: String,
    pub is_predefined: bool,
    pub seed: NewMessage,
}

impl NewConversation {
    /// Free-form conversation opened by the user's first message.
    pub fn free_form(first_message: impl Into<String>) -> Self {
        let content = first_message.into();
        Self {
            id: ConversationId::new_v7(),
            title: derive_title(&content),
            is_predefined: false,
            seed: NewMessage::user(content),
        }
    }

    /// Topic conversation keyed by the catalog id and seeded with the topic greeting.
    pub fn predefined(topic: &TopicRecord) -> Self {
        Self {
            id: ConversationId::new(topic.id.clone()),
            title: topic.title.clone(),
            is_predefined: true,
            seed: NewMessage::assistant(topic.initial_message.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub title: String,
}

/// Builds a free-form title from the first message: the first
/// [`TITLE_MAX_CHARS`] characters, plus [`TITLE_TRUNCATION_MARKER`] when cut.
pub fn derive_title(content: &str) -> String {
    let mut chars = content.chars();
    let mut title: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        title.push_str(TITLE_TRUNCATION_MARKER);
    }
    title
}
