//! Session storage abstractions.

pub mod store;
