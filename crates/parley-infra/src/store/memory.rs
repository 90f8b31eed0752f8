//! In-memory session store backed by a concurrent hash map.
//!
//! Holds the process-wide session map the relay mutates. DashMap gives
//! per-entry locking only; the append-user / call-upstream / append-assistant
//! sequence of a turn is NOT atomic, so a concurrent reader may observe a
//! session mid-turn with the user message present and the reply pending.
//! That interleaving is accepted, not prevented.
//!
//! There is no expiry: sessions live until deleted, cleared, or the process
//! exits. Nothing is persisted.

use dashmap::DashMap;

use parley_core::session::store::SessionStore;
use parley_types::chat::{ChatMessage, Session};
use parley_types::error::StoreError;

/// Process-lifetime session map.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    async fn append_message(
        &self,
        session_id: &str,
        message: ChatMessage,
    ) -> Result<(), StoreError> {
        self.sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id))
            .messages
            .push(message);
        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<Option<Session>, StoreError> {
        Ok(self
            .sessions
            .get(session_id)
            .map(|entry| entry.value().clone()))
    }

    async fn delete(&self, session_id: &str) -> Result<(), StoreError> {
        self.sessions
            .remove(session_id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.sessions.clear();
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Session>, StoreError> {
        Ok(self
            .sessions
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::chat::MessageRole;

    #[tokio::test]
    async fn test_append_creates_session_implicitly() {
        let store = MemorySessionStore::new();
        assert!(store.get("s1").await.unwrap().is_none());

        store
            .append_message("s1", ChatMessage::new(MessageRole::User, "hello"))
            .await
            .unwrap();

        let session = store.get("s1").await.unwrap().unwrap();
        assert_eq!(session.id, "s1");
        assert_eq!(session.messages.len(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_appends_preserve_arrival_order() {
        let store = MemorySessionStore::new();
        for i in 0..5 {
            store
                .append_message("s1", ChatMessage::new(MessageRole::User, format!("m{i}")))
                .await
                .unwrap();
        }

        let session = store.get("s1").await.unwrap().unwrap();
        let contents: Vec<&str> = session.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m0", "m1", "m2", "m3", "m4"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let store = MemorySessionStore::new();
        assert!(matches!(
            store.delete("missing").await.unwrap_err(),
            StoreError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_absent() {
        let store = MemorySessionStore::new();
        store
            .append_message("s1", ChatMessage::new(MessageRole::User, "hello"))
            .await
            .unwrap();

        store.delete("s1").await.unwrap();
        assert!(store.get("s1").await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = MemorySessionStore::new();
        for id in ["a", "b", "c"] {
            store
                .append_message(id, ChatMessage::new(MessageRole::User, "x"))
                .await
                .unwrap();
        }

        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_returns_snapshot_not_live_view() {
        let store = MemorySessionStore::new();
        store
            .append_message("s1", ChatMessage::new(MessageRole::User, "first"))
            .await
            .unwrap();

        let snapshot = store.get("s1").await.unwrap().unwrap();
        store
            .append_message("s1", ChatMessage::new(MessageRole::Assistant, "second"))
            .await
            .unwrap();

        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(store.get("s1").await.unwrap().unwrap().messages.len(), 2);
    }
}
