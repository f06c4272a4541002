pub mod router;
pub mod rules;
pub mod tables;

use agent_first_storage::ConversationId;

pub use router::{KEYWORD_ROUTER_ID, ResponseRouter, Route};
pub use rules::{
    EXCERPT_MAX_CHARS, INPUT_PLACEHOLDER, KeywordGenerator, KeywordRule, excerpt, normalize,
    render,
};

/// Produces the assistant reply for a message submitted to a conversation.
pub trait Responder: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn respond(&self, conversation_id: &ConversationId, text: &str) -> String;
}
