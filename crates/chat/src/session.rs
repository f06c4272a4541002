use std::sync::Arc;

use agent_first_responder::{Responder, ResponseRouter};
use agent_first_storage::{
    ConversationId, ConversationSummary, MemoryStorage, Message, Storage, TopicCatalog,
    TopicRecord,
};
use tokio::sync::RwLock;

use crate::events::{ConversationView, IgnoreReason, PendingReply, SessionSnapshot, SubmitOutcome};
use crate::scheduler::ReplyScheduler;
use crate::settings::ChatSettings;
use crate::state::ChatState;

struct SessionInner<S> {
    state: ChatState<S>,
    // Session-wide, not per conversation: one pending reply blocks submissions everywhere.
    pending: bool,
}

/// Command/query surface handed to a front end.
///
/// Wraps [`ChatState`] with reply generation and the delayed emission of
/// assistant messages. Cloning yields another handle to the same session.
pub struct ChatSession<S = MemoryStorage> {
    inner: Arc<RwLock<SessionInner<S>>>,
    responder: Arc<dyn Responder>,
    scheduler: ReplyScheduler,
}

impl<S> Clone for ChatSession<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            responder: Arc::clone(&self.responder),
            scheduler: self.scheduler.clone(),
        }
    }
}

impl ChatSession<MemoryStorage> {
    /// In-memory session with the built-in catalog and keyword router.
    pub fn builtin(settings: &ChatSettings) -> Self {
        let catalog = Arc::new(TopicCatalog::builtin());
        let responder = Arc::new(ResponseRouter::builtin(Arc::clone(&catalog)));

        tracing::info!(
            responder = responder.name(),
            topic_count = catalog.len(),
            response_delay_ms = settings.response_delay_ms,
            "chat session started"
        );

        Self::new(
            ChatState::in_memory(catalog),
            responder,
            ReplyScheduler::new(settings.response_delay()),
        )
    }
}

impl<S: Storage + 'static> ChatSession<S> {
    pub fn new(
        state: ChatState<S>,
        responder: Arc<dyn Responder>,
        scheduler: ReplyScheduler,
    ) -> Self {
        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                state,
                pending: false,
            })),
            responder,
            scheduler,
        }
    }

    pub async fn start_new_conversation(&self) {
        self.inner.write().await.state.start_new_conversation();
    }

    pub async fn select_conversation(&self, conversation_id: &ConversationId) -> bool {
        self.inner
            .write()
            .await
            .state
            .select_conversation(conversation_id)
    }

    pub async fn activate_topic(&self, topic_id: &str) -> Option<ConversationId> {
        self.inner.write().await.state.activate_topic(topic_id)
    }

    /// Records the user's text and schedules the assistant reply.
    ///
    /// While any reply is pending the submission is rejected without touching
    /// the store. The reply is bound to the conversation chosen here, so later
    /// selection changes do not redirect it.
    pub async fn submit_user_message(&self, text: &str) -> SubmitOutcome {
        let mut inner = self.inner.write().await;
        if inner.pending {
            tracing::debug!("rejecting submission while a reply is pending");
            return SubmitOutcome::Ignored(IgnoreReason::ResponsePending);
        }

        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::EmptyContent);
        }
        let Some(conversation_id) = inner.state.submit_user_message(text) else {
            return SubmitOutcome::Ignored(IgnoreReason::NotRecorded);
        };

        let reply = self.responder.respond(&conversation_id, text);
        inner.pending = true;
        drop(inner);

        let shared = Arc::clone(&self.inner);
        let target = conversation_id.clone();
        let task = self.scheduler.schedule(async move {
            let mut inner = shared.write().await;
            let message_id = inner.state.append_assistant_message(&target, reply);
            inner.pending = false;
            tracing::debug!(conversation_id = %target, "reply emitted");
            message_id
        });

        SubmitOutcome::Scheduled(PendingReply::new(conversation_id, task))
    }

    pub async fn is_pending(&self) -> bool {
        self.inner.read().await.pending
    }

    pub async fn active_conversation_id(&self) -> Option<ConversationId> {
        self.inner.read().await.state.active_conversation_id().cloned()
    }

    /// Messages of the active conversation; empty when nothing is active.
    pub async fn active_messages(&self) -> Vec<Message> {
        self.inner
            .read()
            .await
            .state
            .active_conversation()
            .map(|conversation| conversation.messages().to_vec())
            .unwrap_or_default()
    }

    pub async fn conversation(&self, conversation_id: &ConversationId) -> Option<ConversationView> {
        self.inner
            .read()
            .await
            .state
            .conversation(conversation_id)
            .map(ConversationView::from)
    }

    pub async fn history(&self) -> Vec<ConversationSummary> {
        self.inner.read().await.state.history()
    }

    pub async fn topics(&self) -> Vec<TopicRecord> {
        self.inner.read().await.state.catalog().topics().to_vec()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.read().await;
        SessionSnapshot {
            history: inner.state.history(),
            active: inner
                .state
                .active_conversation()
                .map(ConversationView::from),
            pending: inner.pending,
        }
    }
}
