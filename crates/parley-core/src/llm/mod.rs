//! Upstream LLM abstractions.

pub mod provider;
