//! Session management
//!
//! Sessions live in memory only. Expiry is enforced lazily: an expired
//! session stays in the map until the next lookup of its token (or a sweep)
//! removes it.

use crate::auth::clock::{Clock, SystemClock};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

const TOKEN_BYTES: usize = 32;

/// Default session lifetime
pub fn default_ttl() -> chrono::Duration {
    chrono::Duration::hours(24)
}

/// Session information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque token, also the map key
    pub token: String,
    /// User that owns this session
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A session is expired once the clock has moved strictly past `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// In-memory session storage
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    clock: Arc<dyn Clock>,
    ttl: chrono::Duration,
}

impl SessionStore {
    /// Create a store with the default 24 hour lifetime
    pub fn new() -> Self {
        Self::with_ttl(default_ttl())
    }

    pub fn with_ttl(ttl: chrono::Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: chrono::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Issue a new session for `user_id` and return its token
    pub fn create(&self, user_id: &str) -> String {
        let now = self.clock.now();
        let mut sessions = self.sessions.write();

        // Tokens are unique across live sessions.
        let token = loop {
            let candidate = generate_token();
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };

        sessions.insert(
            token.clone(),
            Session {
                token: token.clone(),
                user_id: user_id.to_string(),
                created_at: now,
                expires_at: now
                    .checked_add_signed(self.ttl)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            },
        );
        tracing::debug!("Created session {} for user {}", token_prefix(&token), user_id);
        token
    }

    /// Resolve a token to its user id, evicting it if it has expired
    pub fn validate(&self, token: &str) -> Option<String> {
        self.get(token).map(|session| session.user_id)
    }

    /// Look up a live session, evicting it if it has expired
    pub fn get(&self, token: &str) -> Option<Session> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write();
        let session = sessions.get(token)?;

        if session.is_expired_at(now) {
            sessions.remove(token);
            tracing::debug!("Session {} expired", token_prefix(token));
            return None;
        }
        Some(session.clone())
    }

    /// Remove a session. Returns whether it existed.
    pub fn revoke(&self, token: &str) -> bool {
        let removed = self.sessions.write().remove(token).is_some();
        if removed {
            tracing::debug!("Revoked session {}", token_prefix(token));
        }
        removed
    }

    /// Remove every session belonging to `user_id`
    pub fn revoke_all_for_user(&self, user_id: &str) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| session.user_id != user_id);
        before - sessions.len()
    }

    /// Cleanup expired sessions
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        let purged = before - sessions.len();
        if purged > 0 {
            tracing::info!("Purged {} expired sessions", purged);
        }
        purged
    }

    /// Number of stored sessions, including expired ones not yet evicted
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Periodically purge expired sessions on the tokio runtime.
    ///
    /// The task runs until the returned handle is aborted.
    pub fn spawn_sweeper(&self, every: std::time::Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                store.purge_expired();
            }
        })
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            clock: Arc::clone(&self.clock),
            ttl: self.ttl,
        }
    }
}

fn generate_token() -> String {
    URL_SAFE_NO_PAD.encode(rand::random::<[u8; TOKEN_BYTES]>())
}

/// Short token prefix for log lines
pub(crate) fn token_prefix(token: &str) -> &str {
    token.get(..8).unwrap_or(token)
}
