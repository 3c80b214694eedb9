//! Server-side sessions.
//!
//! A session is created at successful login, presented by the client as a
//! bearer token, and invalidated at logout. Tokens are opaque 32-byte random
//! values, hex-encoded; nothing about the user is derivable from one.

use std::collections::HashMap;
use std::sync::RwLock;

use rand::rngs::OsRng;
use rand::RngCore;
use time::{Duration, OffsetDateTime};

const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

/// In-process token -> session map. Process-local by design: there is no
/// cross-instance session sharing, matching the single-process deployment.
pub struct SessionStore {
    inner: RwLock<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Create a session for a freshly authenticated user.
    pub fn create(&self, user_id: i64) -> Session {
        let now = OffsetDateTime::now_utc();
        let session = Session {
            token: generate_token(),
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
        };
        let mut map = self.inner.write().expect("session lock poisoned");
        map.insert(session.token.clone(), session.clone());
        session
    }

    /// Resolve a bearer token to its session. Expired entries are evicted
    /// here rather than by a background sweep.
    pub fn resolve(&self, token: &str) -> Option<Session> {
        let now = OffsetDateTime::now_utc();
        let mut map = self.inner.write().expect("session lock poisoned");
        match map.get(token) {
            Some(s) if now < s.expires_at => Some(s.clone()),
            Some(_) => {
                map.remove(token);
                None
            }
            None => None,
        }
    }

    /// Invalidate a session at logout. Returns false if the token was not
    /// live (already logged out or expired).
    pub fn invalidate(&self, token: &str) -> bool {
        let mut map = self.inner.write().expect("session lock poisoned");
        map.remove(token).is_some()
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_resolve() {
        let store = SessionStore::new(60);
        let session = store.create(42);
        let resolved = store.resolve(&session.token).expect("session live");
        assert_eq!(resolved.user_id, 42);
    }

    #[test]
    fn invalidate_removes_the_session() {
        let store = SessionStore::new(60);
        let session = store.create(7);
        assert!(store.invalidate(&session.token));
        assert!(store.resolve(&session.token).is_none());
        // Second logout with the same token is a no-op.
        assert!(!store.invalidate(&session.token));
    }

    #[test]
    fn unknown_token_does_not_resolve() {
        let store = SessionStore::new(60);
        store.create(1);
        assert!(store.resolve("deadbeef").is_none());
    }

    #[test]
    fn expired_session_is_rejected_and_evicted() {
        let store = SessionStore::new(0);
        let session = store.create(9);
        assert!(store.resolve(&session.token).is_none());
        let map = store.inner.read().unwrap();
        assert!(!map.contains_key(&session.token));
    }

    #[test]
    fn tokens_are_unique_and_opaque() {
        let store = SessionStore::new(60);
        let a = store.create(1);
        let b = store.create(1);
        assert_ne!(a.token, b.token);
        assert_eq!(a.token.len(), TOKEN_BYTES * 2);
    }
}
