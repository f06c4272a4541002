#![deny(unsafe_code)]

/// Terminal command parsing and fixed UI strings.
pub mod command;
pub mod events;
/// Delayed emission of assistant replies.
pub mod scheduler;
/// Async command/query facade over chat state, replies and the pending flag.
pub mod session;
/// Settings loading (figment) and persistence.
pub mod settings;
pub mod state;
pub mod transcript;

pub use command::Command;
pub use events::{ConversationView, IgnoreReason, PendingReply, SessionSnapshot, SubmitOutcome};
pub use scheduler::{DEFAULT_RESPONSE_DELAY, ReplyScheduler, ResponseDelay, TokioDelay};
pub use session::ChatSession;
pub use settings::{ChatSettings, SettingsError};
pub use state::ChatState;
