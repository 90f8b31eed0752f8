//! SessionStore trait definition.
//!
//! The relay owns no session map of its own; a store is injected at
//! construction time so tests can substitute a double and the process-wide
//! map stays explicit. Uses native async fn in traits (RPITIT).

use parley_types::chat::{ChatMessage, Session};
use parley_types::error::StoreError;

/// Repository trait for session history.
///
/// Implementations live in parley-infra (e.g., `MemorySessionStore`).
/// Sessions are created implicitly by the first append and removed only by
/// `delete` or `clear`; there is no expiry.
pub trait SessionStore: Send + Sync + 'static {
    /// Append a message to a session, creating the session if absent.
    fn append_message(
        &self,
        session_id: &str,
        message: ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Get a session with its full message list.
    fn get(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>, StoreError>> + Send;

    /// Delete a session entirely. Fails with [`StoreError::NotFound`] if the
    /// key is unknown.
    fn delete(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// Remove every session unconditionally.
    fn clear(&self) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// List all sessions, in no particular order.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Session>, StoreError>> + Send;

    /// Count sessions currently held.
    fn count(&self) -> impl std::future::Future<Output = Result<usize, StoreError>> + Send;
}
