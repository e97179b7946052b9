//! LuckyChat core: a rule-based chat responder.
//!
//! Messages are matched against ordered intent patterns and answered from a
//! knowledge base; replies can be streamed word by word. The actor layer
//! exposes this to a transport through [`actors::supervisor::SupervisorHandle`].

pub mod actors;
pub mod brain;
pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;

#[cfg(test)]
mod tests;
