use crate::brain::Reply;
use crate::models::ChatRequest;
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// An error reported by a reply backend.
    #[error("Backend request failed: {0}")]
    Backend(String),
    /// A channel to or from an actor closed unexpectedly.
    #[error("Channel closed: {0}")]
    ChannelClosed(String),
    /// A generic internal error within an actor.
    #[error("Internal system error: {0}")]
    Internal(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

impl From<oneshot::error::RecvError> for ActorError {
    fn from(err: oneshot::error::RecvError) -> Self {
        ActorError::ChannelClosed(format!("Actor dropped the reply channel: {}", err))
    }
}

impl<T> From<mpsc::error::SendError<T>> for ActorError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        ActorError::ChannelClosed("Actor is no longer running".to_string())
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Sender half for streamed word chunks.
pub type ChunkSender = mpsc::Sender<Result<String, AppError>>;

/// Messages that can be sent to the `ResponderActor`.
#[derive(Debug)]
pub enum ResponderMessage {
    /// Compose a complete reply.
    Respond {
        message: String,
        /// A channel to send the reply back.
        responder: oneshot::Sender<Result<Reply, AppError>>,
    },
    /// Insert or overwrite a knowledge entry.
    AddKnowledge {
        key: String,
        text: String,
        responder: oneshot::Sender<Result<(), AppError>>,
    },
    /// Read a knowledge entry directly.
    Lookup {
        key: String,
        responder: oneshot::Sender<Result<Option<String>, AppError>>,
    },
}

/// Messages that can be sent to the `SupervisorActor`.
#[derive(Debug)]
pub enum SupervisorMessage {
    /// A request to process a user's chat message.
    ProcessUserMessage {
        request: ChatRequest,
        /// Optional channel for streamed chunks; without it the reply is not streamed.
        chunk_sender: Option<ChunkSender>,
        /// A channel to send the final reply back.
        responder: oneshot::Sender<Result<crate::models::ChatReply, AppError>>,
    },
    /// A request to add knowledge, delegated to the rule engine.
    AddKnowledge {
        key: String,
        text: String,
        responder: oneshot::Sender<Result<(), AppError>>,
    },
    /// A command to shut down the supervisor.
    Shutdown,
}
