use agent_first_storage::{Conversation, ConversationId, ConversationSummary, Message, MessageId};
use tokio::task::JoinHandle;

/// Why a submission left the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// Text was empty after trimming.
    EmptyContent,
    /// A reply is still pending somewhere in the session.
    ResponsePending,
    /// The store refused the user message; see the warning in the log.
    NotRecorded,
}

/// Result of submitting user text to the session.
#[derive(Debug)]
pub enum SubmitOutcome {
    Scheduled(PendingReply),
    Ignored(IgnoreReason),
}

impl SubmitOutcome {
    pub fn conversation_id(&self) -> Option<&ConversationId> {
        match self {
            Self::Scheduled(pending) => Some(pending.conversation_id()),
            Self::Ignored(_) => None,
        }
    }

    pub fn ignore_reason(&self) -> Option<IgnoreReason> {
        match self {
            Self::Scheduled(_) => None,
            Self::Ignored(reason) => Some(*reason),
        }
    }

    pub fn into_pending(self) -> Option<PendingReply> {
        match self {
            Self::Scheduled(pending) => Some(pending),
            Self::Ignored(_) => None,
        }
    }
}

/// Handle to an assistant reply that has been scheduled but not yet appended.
///
/// Dropping the handle does not cancel the reply.
#[derive(Debug)]
pub struct PendingReply {
    conversation_id: ConversationId,
    task: JoinHandle<Option<MessageId>>,
}

impl PendingReply {
    pub(crate) fn new(
        conversation_id: ConversationId,
        task: JoinHandle<Option<MessageId>>,
    ) -> Self {
        Self {
            conversation_id,
            task,
        }
    }

    /// Conversation captured at submission time; the reply always lands here.
    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the reply and returns the id of the appended assistant message.
    pub async fn wait(self) -> Option<MessageId> {
        match self.task.await {
            Ok(message_id) => message_id,
            Err(error) => {
                tracing::error!(
                    conversation_id = %self.conversation_id,
                    error = %error,
                    "reply task failed"
                );
                None
            }
        }
    }
}

/// Owned copy of one conversation for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationView {
    pub id: ConversationId,
    pub title: String,
    pub is_predefined: bool,
    pub messages: Vec<Message>,
}

impl From<&Conversation> for ConversationView {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id().clone(),
            title: conversation.title().to_string(),
            is_predefined: conversation.is_predefined(),
            messages: conversation.messages().to_vec(),
        }
    }
}

/// Everything a front end needs to draw the session at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub history: Vec<ConversationSummary>,
    pub active: Option<ConversationView>,
    pub pending: bool,
}
