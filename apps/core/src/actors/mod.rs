//! Message-passing layer around the rule engine.
//!
//! Each actor runs in its own Tokio task and is reached through a cloneable
//! handle. Requests carry a `oneshot` for the reply; streamed replies also
//! carry an `mpsc` sender for word chunks.

pub mod messages;
pub mod responder;
pub mod supervisor;
pub mod traits;
