//! Session management
//!
//! Maps opaque session tokens (carried in a cookie) to the id of the user
//! they authenticate. Sessions are ephemeral and lost on restart.

use chrono::{DateTime, Utc};
use moka::future::Cache;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Session token (random UUID stored in a cookie)
pub type SessionToken = String;

/// A live login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// In-memory session store.
///
/// Built without capacity or time-to-live so an entry stays until it is
/// explicitly destroyed.
#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Cache<SessionToken, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Cache::builder().build(),
        }
    }

    /// Create a new session for a user and return its token.
    ///
    /// Tokens are v4 UUIDs, drawn from the operating system's random source.
    #[instrument(skip(self))]
    pub async fn create_session(&self, user_id: i32) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            user_id,
            created_at: Utc::now(),
        };
        self.sessions.insert(token.clone(), session).await;
        debug!("Session created for user ID: {}", user_id);
        token
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).await
    }

    /// Removes the session, returning it if it existed.
    #[instrument(skip_all)]
    pub async fn destroy_session(&self, token: &str) -> Option<Session> {
        let removed = self.sessions.remove(token).await;
        if let Some(session) = &removed {
            debug!("Session destroyed for user ID: {}", session.user_id);
        }
        removed
    }

    /// Number of active sessions.
    pub async fn session_count(&self) -> u64 {
        // entry_count lags behind writes until pending maintenance has run
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_get_session() {
        let store = SessionStore::new();

        let token = store.create_session(7).await;
        let session = store.get(&token).await.unwrap();

        assert_eq!(session.user_id, 7);
        assert!(session.created_at <= Utc::now());
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test]
    async fn test_tokens_are_unique() {
        let store = SessionStore::new();

        let first = store.create_session(1).await;
        let second = store.create_session(1).await;

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(store.session_count().await, 2);
    }

    #[tokio::test]
    async fn test_destroy_session() {
        let store = SessionStore::new();
        let token = store.create_session(3).await;

        assert!(store.destroy_session(&token).await.is_some());
        assert!(store.get(&token).await.is_none());
        assert!(store.destroy_session(&token).await.is_none());
        assert_eq!(store.session_count().await, 0);
    }
}
