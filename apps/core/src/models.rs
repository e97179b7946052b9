use crate::brain::{IntentTier, Reply};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// An incoming chat message.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    /// Caller-chosen conversation identifier, used only for logging and echoing back.
    #[validate(length(min = 1, max = 128))]
    pub session_id: String,
    /// The user's message. May be empty; the responder answers with its default.
    pub message: String,
    /// Route to the external backend instead of the rule engine.
    #[serde(default)]
    pub use_external: bool,
}

impl ChatRequest {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
            use_external: false,
        }
    }

    pub fn external(mut self) -> Self {
        self.use_external = true;
        self
    }
}

/// Which backend produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    RuleEngine,
    External,
}

/// The final reply handed back to the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    /// Unique identifier for this reply (UUID v4).
    pub id: Uuid,
    pub session_id: String,
    /// Matched intent, if the rule engine found one.
    pub intent: Option<String>,
    pub tier: Option<IntentTier>,
    pub source: ReplySource,
    /// Full reply text.
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatReply {
    pub fn from_reply(session_id: String, source: ReplySource, reply: Reply) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            intent: reply.intent,
            tier: reply.tier,
            source,
            content: reply.text,
            created_at: Utc::now(),
        }
    }
}
