//! The chat relay: session-scoped request -> upstream call -> response/stream.

pub mod catalog;
pub mod prompt;
pub mod service;

pub use service::{RelayEvent, RelayService};
