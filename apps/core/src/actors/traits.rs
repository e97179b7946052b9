use crate::actors::messages::{AppError, ChunkSender};
use crate::brain::Reply;
use async_trait::async_trait;

/// Defines the public interface for anything that can answer a chat message.
///
/// The rule engine implements it through `ResponderActorHandle`; an external
/// language-model client would implement the same trait and be handed to the
/// supervisor as its fallback backend.
#[async_trait]
pub trait ChatBackend: Send + Sync + 'static {
    /// Produces a complete reply to `message`.
    async fn respond(&self, message: String) -> Result<Reply, AppError>;

    /// Produces a reply, sending it down `chunk_sender` as it is generated.
    ///
    /// The returned reply holds the full text once streaming has finished.
    async fn stream_respond(
        &self,
        message: String,
        chunk_sender: ChunkSender,
    ) -> Result<Reply, AppError>;
}

/// Defines the knowledge mutation and lookup interface.
#[async_trait]
pub trait KnowledgeStore: Send + Sync + 'static {
    /// Inserts or overwrites the entry for `key`.
    async fn add_knowledge(&self, key: String, text: String) -> Result<(), AppError>;

    /// Reads the entry for `key` without classification.
    async fn lookup(&self, key: String) -> Result<Option<String>, AppError>;
}
