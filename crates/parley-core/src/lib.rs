//! Business logic for the Parley chat relay.
//!
//! Defines the [`session::store::SessionStore`] and
//! [`llm::provider::LlmProvider`] traits and the [`relay::RelayService`]
//! that orchestrates them. This crate never depends on parley-infra;
//! concrete implementations are injected at construction time.

pub mod llm;
pub mod relay;
pub mod session;
