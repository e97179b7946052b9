//! # Brain Module
//!
//! Rule-based reply engine for LuckyChat. No model, no learning: each
//! message is classified on its own and answered from a knowledge base.
//!
//! ## Components
//! - `knowledge`: topic key → canned response store
//! - `intent`: ordered regex classification over priority tiers
//! - `composer`: name extraction, templating and knowledge lookup
//! - `streaming`: word-by-word re-emission with a fixed delay
//! - `responder`: orchestrator tying the above together

pub mod composer;
pub mod intent;
pub mod knowledge;
pub mod responder;
pub mod streaming;

pub use composer::{ComposedResponse, ResponseComposer};
pub use intent::{ClassificationResult, IntentClassifier, IntentDefinition, IntentTier};
pub use knowledge::{KnowledgeBase, KnowledgeEntry};
pub use responder::{LuckyResponder, Reply};
pub use streaming::{word_chunks, StreamingAdapter, WordChunks};
