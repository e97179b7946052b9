use crate::actors::messages::{ActorError, AppError, ChunkSender, SupervisorMessage};
use crate::actors::responder::ResponderActorHandle;
use crate::actors::traits::{ChatBackend, KnowledgeStore};
use crate::config::ResponderConfig;
use crate::models::{ChatReply, ChatRequest, ReplySource};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{timeout, Duration};
use tracing::{error, info, instrument, warn};
use validator::Validate;

/// A handle to the `SupervisorActor`.
///
/// This is the primary entry point for the transport layer. It validates chat
/// requests and routes them to the rule engine, or to an external backend
/// when one is configured and requested.
#[derive(Clone)]
pub struct SupervisorHandle {
    sender: mpsc::Sender<SupervisorMessage>,
    request_timeout: Duration,
    stream_delay: Duration,
}

impl SupervisorHandle {
    /// Creates a supervisor backed by a fresh rule engine and no external backend.
    pub fn new(config: &ResponderConfig) -> Self {
        let rule_engine = Arc::new(ResponderActorHandle::new(config));
        Self::new_with_backends(rule_engine, None, config)
    }

    /// Creates a supervisor with explicit backends.
    ///
    /// # Arguments
    ///
    /// * `rule_engine` - Answers every message not routed elsewhere and owns the knowledge.
    /// * `external` - Optional fallback used when a request sets `use_external`.
    /// * `config` - Timeouts and message size limits.
    pub fn new_with_backends<R>(
        rule_engine: Arc<R>,
        external: Option<Arc<dyn ChatBackend>>,
        config: &ResponderConfig,
    ) -> Self
    where
        R: ChatBackend + KnowledgeStore,
    {
        let (sender, receiver) = mpsc::channel(32);
        let runner = SupervisorRunner {
            receiver,
            rule_engine,
            external,
            max_message_chars: config.max_message_chars,
        };
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            request_timeout: config.request_timeout(),
            stream_delay: config.stream_delay(),
        }
    }

    /// Processes a chat message and returns the complete reply.
    ///
    /// When `chunk_sender` is given, the reply is also streamed through it word
    /// by word; the sender is dropped once the stream is finished. The request
    /// timeout then bounds each wait for the next chunk rather than the whole
    /// paced stream. On timeout no further chunks are forwarded and the work
    /// behind the request is dropped.
    #[instrument(skip(self, request, chunk_sender), fields(session_id = %request.session_id))]
    pub async fn process_message(
        &self,
        request: ChatRequest,
        chunk_sender: Option<ChunkSender>,
    ) -> Result<ChatReply, AppError> {
        match chunk_sender {
            Some(chunk_sender) => self.process_streaming(request, chunk_sender).await,
            None => {
                let recv = self.submit(request, None).await?;
                timeout(self.request_timeout, recv)
                    .await
                    .map_err(ActorError::from)?
                    .map_err(ActorError::from)?
            }
        }
    }

    async fn submit(
        &self,
        request: ChatRequest,
        chunk_sender: Option<ChunkSender>,
    ) -> Result<oneshot::Receiver<Result<ChatReply, AppError>>, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::ProcessUserMessage {
            request,
            chunk_sender,
            responder: send,
        };
        self.sender.send(msg).await.map_err(ActorError::from)?;
        Ok(recv)
    }

    async fn process_streaming(
        &self,
        request: ChatRequest,
        chunk_sender: ChunkSender,
    ) -> Result<ChatReply, AppError> {
        let (relay_sender, mut relay) = mpsc::channel(32);
        let recv = self.submit(request, Some(relay_sender)).await?;
        let step_budget = self.request_timeout + self.stream_delay;

        // The relay closes once the backend is done with its sender.
        while let Some(chunk) = timeout(step_budget, relay.recv())
            .await
            .map_err(ActorError::from)?
        {
            chunk_sender.send(chunk).await.map_err(|_| {
                ActorError::ChannelClosed("chunk receiver dropped".to_string())
            })?;
        }

        timeout(self.request_timeout, recv)
            .await
            .map_err(ActorError::from)?
            .map_err(ActorError::from)?
    }

    /// Adds knowledge to the rule engine.
    pub async fn add_knowledge(&self, key: String, text: String) -> Result<(), AppError> {
        let (send, recv) = oneshot::channel();
        let msg = SupervisorMessage::AddKnowledge {
            key,
            text,
            responder: send,
        };
        self.sender.send(msg).await.map_err(ActorError::from)?;
        timeout(self.request_timeout, recv)
            .await
            .map_err(ActorError::from)?
            .map_err(ActorError::from)?
    }

    /// Stops the supervisor loop. Requests already in flight still complete.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender
            .send(SupervisorMessage::Shutdown)
            .await
            .map_err(ActorError::from)?;
        Ok(())
    }
}

// --- Actor Runner ---
struct SupervisorRunner<R>
where
    R: ChatBackend + KnowledgeStore,
{
    receiver: mpsc::Receiver<SupervisorMessage>,
    rule_engine: Arc<R>,
    external: Option<Arc<dyn ChatBackend>>,
    max_message_chars: usize,
}

impl<R> SupervisorRunner<R>
where
    R: ChatBackend + KnowledgeStore,
{
    async fn run(mut self) {
        info!("Supervisor started");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SupervisorMessage::ProcessUserMessage {
                    request,
                    chunk_sender,
                    responder,
                } => {
                    // Each message is independent; don't let one stream block the next.
                    let route = self.route(&request);
                    let max_chars = self.max_message_chars;
                    tokio::spawn(async move {
                        let mut responder = responder;
                        let result = tokio::select! {
                            result = handle_user_message(route, request, chunk_sender, max_chars) => result,
                            _ = responder.closed() => {
                                warn!("Caller stopped waiting, dropping user message");
                                return;
                            }
                        };
                        if let Err(e) = &result {
                            error!("Error processing user message: {:?}", e);
                        }
                        let _ = responder.send(result);
                    });
                }
                SupervisorMessage::AddKnowledge {
                    key,
                    text,
                    responder,
                } => {
                    info!(key = %key, "Supervisor delegating knowledge update");
                    let rule_engine = self.rule_engine.clone();
                    tokio::spawn(async move {
                        let result = rule_engine.add_knowledge(key, text).await;
                        let _ = responder.send(result);
                    });
                }
                SupervisorMessage::Shutdown => {
                    info!("Supervisor shutting down...");
                    break;
                }
            }
        }
        info!("Supervisor stopped");
    }

    fn route(&self, request: &ChatRequest) -> (Arc<dyn ChatBackend>, ReplySource) {
        if request.use_external {
            match &self.external {
                Some(external) => return (external.clone(), ReplySource::External),
                None => warn!(
                    session_id = %request.session_id,
                    "External backend requested but none configured, using rule engine"
                ),
            }
        }
        let rule_engine: Arc<dyn ChatBackend> = self.rule_engine.clone();
        (rule_engine, ReplySource::RuleEngine)
    }
}

async fn handle_user_message(
    (backend, source): (Arc<dyn ChatBackend>, ReplySource),
    request: ChatRequest,
    chunk_sender: Option<ChunkSender>,
    max_message_chars: usize,
) -> Result<ChatReply, AppError> {
    request.validate()?;
    let length = request.message.chars().count();
    if length > max_message_chars {
        return Err(AppError::Validation(format!(
            "Message is {} characters long, the limit is {}",
            length, max_message_chars
        )));
    }

    let ChatRequest {
        session_id,
        message,
        ..
    } = request;

    let reply = match chunk_sender {
        Some(chunk_sender) => backend.stream_respond(message, chunk_sender).await?,
        None => backend.respond(message).await?,
    };

    info!(
        session_id = %session_id,
        intent = reply.intent.as_deref().unwrap_or("none"),
        source = ?source,
        "Reply ready"
    );
    Ok(ChatReply::from_reply(session_id, source, reply))
}
