// LuckyChat Backend Entry Point
// Line-oriented chat loop over stdin/stdout, driven by the supervisor.

use anyhow::Context;
use luckychat_core::actors::responder::ResponderActorHandle;
use luckychat_core::actors::supervisor::SupervisorHandle;
use luckychat_core::brain::{KnowledgeBase, LuckyResponder};
use luckychat_core::config::AppConfig;
use luckychat_core::models::ChatRequest;
use luckychat_core::telemetry;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info};

const SESSION_ID: &str = "console";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.telemetry).context("Failed to initialize tracing")?;

    info!(
        stream_delay_ms = config.responder.stream_delay_ms,
        "Starting LuckyChat console"
    );
    let knowledge = Arc::new(KnowledgeBase::new());
    if let Some(path) = &config.responder.knowledge_file {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read knowledge file {}", path.display()))?;
        let loaded = knowledge
            .load_json(&json)
            .with_context(|| format!("Invalid knowledge file {}", path.display()))?;
        info!(loaded, path = %path.display(), "Loaded extra knowledge");
    }

    let responder = Arc::new(LuckyResponder::with_knowledge(&config.responder, knowledge));
    let rule_engine = Arc::new(ResponderActorHandle::with_responder(
        responder,
        &config.responder,
    ));
    let supervisor = SupervisorHandle::new_with_backends(rule_engine, None, &config.responder);

    println!("🍀 LuckyChat is ready. Type a message, `/learn <key> <text>` or `/quit`.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();

        if line == "/quit" {
            break;
        }
        if let Some(rest) = line.strip_prefix("/learn ") {
            match rest.trim().split_once(' ') {
                Some((key, text)) => {
                    supervisor.add_knowledge(key.to_string(), text.trim().to_string()).await?;
                    println!("Learned \"{}\".", key);
                }
                None => println!("Usage: /learn <key> <text>"),
            }
            continue;
        }

        let (chunk_tx, mut chunk_rx) = mpsc::channel(32);
        let printer = tokio::spawn(async move {
            let mut stdout = std::io::stdout();
            while let Some(chunk) = chunk_rx.recv().await {
                match chunk {
                    Ok(token) => {
                        let _ = write!(stdout, "{}", token);
                        let _ = stdout.flush();
                    }
                    Err(e) => error!("Streaming error: {}", e),
                }
            }
            println!();
        });

        let result = supervisor
            .process_message(ChatRequest::new(SESSION_ID, line), Some(chunk_tx))
            .await;
        printer.await.context("Printer task failed")?;

        if let Err(e) = result {
            error!("Failed to answer: {}", e);
            println!("Sorry, something went wrong: {}", e);
        }
    }

    supervisor.shutdown().await?;
    info!("LuckyChat console stopped");
    Ok(())
}
