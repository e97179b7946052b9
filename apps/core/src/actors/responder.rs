use crate::actors::messages::{ActorError, AppError, ChunkSender, ResponderMessage};
use crate::actors::traits::{ChatBackend, KnowledgeStore};
use crate::brain::{LuckyResponder, Reply, StreamingAdapter};
use crate::config::ResponderConfig;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, info, instrument};

/// A handle to the `ResponderActor`.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running rule engine. It abstracts away the `mpsc::Sender`.
///
/// Streaming is paced in the caller's task once the actor has produced the
/// reply, so the request timeout only covers the round-trip and dropping the
/// returned future stops the stream.
#[derive(Clone)]
pub struct ResponderActorHandle {
    sender: mpsc::Sender<ResponderMessage>,
    request_timeout: Duration,
    streaming: StreamingAdapter,
}

impl ResponderActorHandle {
    /// Creates a `ResponderActor` with the built-in knowledge base.
    pub fn new(config: &ResponderConfig) -> Self {
        Self::with_responder(Arc::new(LuckyResponder::new(config)), config)
    }

    /// Creates a `ResponderActor` around an existing responder.
    ///
    /// This will spawn the `ResponderActorRunner` in a new Tokio task.
    pub fn with_responder(responder: Arc<LuckyResponder>, config: &ResponderConfig) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = ResponderActorRunner::new(receiver, responder);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            request_timeout: config.request_timeout(),
            streaming: StreamingAdapter::new(config.stream_delay()),
        }
    }

    async fn request<T>(
        &self,
        msg: ResponderMessage,
        recv: oneshot::Receiver<Result<T, AppError>>,
    ) -> Result<T, AppError> {
        self.sender.send(msg).await.map_err(ActorError::from)?;
        timeout(self.request_timeout, recv)
            .await
            .map_err(ActorError::from)?
            .map_err(ActorError::from)?
    }
}

#[async_trait]
impl ChatBackend for ResponderActorHandle {
    async fn respond(&self, message: String) -> Result<Reply, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = ResponderMessage::Respond {
            message,
            responder: send,
        };
        self.request(msg, recv).await
    }

    async fn stream_respond(
        &self,
        message: String,
        chunk_sender: ChunkSender,
    ) -> Result<Reply, AppError> {
        let reply = self.respond(message).await?;
        let sent = self
            .streaming
            .emit_to_channel(&reply.text, &chunk_sender)
            .await?;
        debug!(chunks = sent, "Reply streamed");
        Ok(reply)
    }
}

#[async_trait]
impl KnowledgeStore for ResponderActorHandle {
    async fn add_knowledge(&self, key: String, text: String) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        let msg = ResponderMessage::AddKnowledge {
            key,
            text,
            responder: send,
        };
        self.request(msg, recv).await
    }

    async fn lookup(&self, key: String) -> Result<Option<String>, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = ResponderMessage::Lookup {
            key,
            responder: send,
        };
        self.request(msg, recv).await
    }
}

// --- Actor Runner (Internal Logic) ---
struct ResponderActorRunner {
    receiver: mpsc::Receiver<ResponderMessage>,
    responder: Arc<LuckyResponder>,
}

impl ResponderActorRunner {
    fn new(receiver: mpsc::Receiver<ResponderMessage>, responder: Arc<LuckyResponder>) -> Self {
        Self {
            receiver,
            responder,
        }
    }

    async fn run(mut self) {
        info!("ResponderActor started");
        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg);
        }
        info!("ResponderActor stopped");
    }

    #[instrument(skip_all)]
    fn handle_message(&self, msg: ResponderMessage) {
        match msg {
            ResponderMessage::Respond { message, responder } => {
                let reply = self.responder.reply(&message);
                let _ = responder.send(Ok(reply));
            }
            ResponderMessage::AddKnowledge {
                key,
                text,
                responder,
            } => {
                self.responder.add_knowledge(&key, &text);
                let _ = responder.send(Ok(()));
            }
            ResponderMessage::Lookup { key, responder } => {
                debug!(key = %key, "Knowledge lookup");
                let _ = responder.send(Ok(self.responder.knowledge(&key)));
            }
        }
    }
}
