//! Shared domain types for Parley.
//!
//! This crate contains the core domain types used across the Parley relay:
//! chat messages, session summaries, the model catalog, LLM request/response
//! shapes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod llm;
