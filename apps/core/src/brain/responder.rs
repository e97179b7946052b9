//! LuckyResponder - the rule-based reply engine.
//!
//! Classifies a message, composes a reply, and optionally streams it.
//! Always produces text: no match yields the configured default, and a
//! matched intent without a knowledge entry yields a placeholder naming
//! the missing key (logged as a warning).

use super::composer::{ComposedResponse, ResponseComposer};
use super::intent::{ClassificationResult, IntentClassifier, IntentTier};
use super::knowledge::KnowledgeBase;
use super::streaming::StreamingAdapter;
use crate::config::ResponderConfig;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// A composed reply with the intent that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub intent: Option<String>,
    pub tier: Option<IntentTier>,
    pub text: String,
}

pub struct LuckyResponder {
    knowledge: Arc<KnowledgeBase>,
    classifier: IntentClassifier,
    composer: ResponseComposer,
    streaming: StreamingAdapter,
}

impl Default for LuckyResponder {
    fn default() -> Self {
        Self::new(&ResponderConfig::default())
    }
}

impl LuckyResponder {
    /// Built-in knowledge and intents.
    pub fn new(config: &ResponderConfig) -> Self {
        Self::with_knowledge(config, Arc::new(KnowledgeBase::new()))
    }

    /// Uses the given store instead of a fresh built-in one.
    pub fn with_knowledge(config: &ResponderConfig, knowledge: Arc<KnowledgeBase>) -> Self {
        Self::with_parts(config, knowledge, IntentClassifier::new())
    }

    pub fn with_parts(
        config: &ResponderConfig,
        knowledge: Arc<KnowledgeBase>,
        classifier: IntentClassifier,
    ) -> Self {
        Self {
            composer: ResponseComposer::new(knowledge.clone(), config.default_response.clone()),
            streaming: StreamingAdapter::new(config.stream_delay()),
            knowledge,
            classifier,
        }
    }

    /// Classifies `text` and runs extraction for templated intents.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let mut result = self.classifier.classify(text);
        if let Some(intent) = result.intent.as_deref() {
            if ResponseComposer::has_extraction(intent) {
                result.extracted_groups = self.composer.extract(intent, text);
                if result.extracted_groups.is_none() {
                    debug!(intent, "Extraction did not capture, using knowledge entry");
                }
            }
        }
        result
    }

    /// Full reply for `text`, never empty.
    pub fn reply(&self, text: &str) -> Reply {
        let started = Instant::now();
        let result = self.classify(text);
        let composed = self.composer.compose(&result);

        let text = match composed {
            ComposedResponse::Templated(t)
            | ComposedResponse::Knowledge(t)
            | ComposedResponse::Default(t) => t,
            ComposedResponse::Missing(key) => {
                warn!(intent = %key, "Matched intent has no knowledge entry");
                missing_entry_placeholder(&key)
            }
        };

        debug!(
            intent = result.intent.as_deref().unwrap_or("none"),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Reply composed"
        );

        Reply {
            intent: result.intent,
            tier: result.tier,
            text,
        }
    }

    /// Response text for `text`, never empty.
    pub fn generate_response(&self, text: &str) -> String {
        self.reply(text).text
    }

    /// Streams the response through `sink`, one word chunk at a time.
    pub async fn stream_response<F>(&self, text: &str, sink: F) -> Reply
    where
        F: FnMut(String),
    {
        let reply = self.reply(text);
        self.streaming.emit(&reply.text, sink).await;
        reply
    }

    /// Response as an owned async stream of word chunks.
    pub fn response_stream(&self, text: &str) -> impl Stream<Item = String> + Send + 'static {
        self.streaming.stream(self.generate_response(text))
    }

    /// Adds or replaces a knowledge entry. Does not add intent patterns.
    pub fn add_knowledge(&self, key: &str, text: &str) {
        debug!(key, "Knowledge entry added");
        self.knowledge.put(key, text);
    }

    /// Direct lookup, bypassing classification.
    pub fn knowledge(&self, key: &str) -> Option<String> {
        self.knowledge.get(key)
    }
}

fn missing_entry_placeholder(key: &str) -> String {
    format!(
        "I know this is about \"{}\", but I don't have an answer for it yet.",
        key
    )
}
