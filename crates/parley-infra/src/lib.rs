//! Infrastructure implementations for Parley.
//!
//! Concrete implementations of the parley-core traits: the DashMap-backed
//! in-memory session store and the OpenAI-compatible LLM provider.

pub mod llm;
pub mod store;
