//! Plain-text rendering of session data for the terminal.

use agent_first_storage::{ConversationSummary, Message, MessageRole, TopicRecord};

use crate::command::{WELCOME_BODY, WELCOME_TITLE};
use crate::events::ConversationView;

const ASSISTANT_LABEL: &str = "Agent First";
const USER_LABEL: &str = "Você";

pub fn welcome() -> String {
    format!("{WELCOME_TITLE}\n{WELCOME_BODY}\n")
}

pub fn message(message: &Message) -> String {
    let label = match message.role {
        MessageRole::User => USER_LABEL,
        MessageRole::Assistant => ASSISTANT_LABEL,
    };
    format!("[{label}]\n{}\n", message.content)
}

/// Whole conversation with a title header; empty conversations show the welcome text.
pub fn conversation(view: &ConversationView) -> String {
    let mut out = format!("== {} ({}) ==\n", view.title, view.id);
    if view.messages.is_empty() {
        out.push_str(&welcome());
        return out;
    }
    for item in &view.messages {
        out.push('\n');
        out.push_str(&message(item));
    }
    out
}

pub fn history(entries: &[ConversationSummary], active: Option<&str>) -> String {
    if entries.is_empty() {
        return "Nenhuma conversa ainda.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let marker = if active == Some(entry.id.as_str()) { '*' } else { ' ' };
        out.push_str(&format!("{marker} {}  {}\n", entry.id, entry.title));
    }
    out
}

pub fn topics(topics: &[TopicRecord], active: Option<&str>) -> String {
    let mut out = String::from("Menu Principal\n");
    for topic in topics {
        let marker = if active == Some(topic.id.as_str()) { '*' } else { ' ' };
        out.push_str(&format!("{marker} {:<8} {}\n", topic.id, topic.title));
    }
    out
}
