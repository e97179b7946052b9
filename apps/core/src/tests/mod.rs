//! Test Module
//!
//! Test suite for the LuckyChat core.
//!
//! ## Test Categories
//! - `brain_tests`: classification priority, anchoring, composition and streaming
//! - `actor_tests`: responder actor round-trips and streaming over channels
//! - `supervisor_tests`: routing, validation and external backend fallback

pub mod brain_tests;
