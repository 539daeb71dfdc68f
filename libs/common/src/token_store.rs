//! In-memory store for access token grants
//!
//! Grants obtained through the OAuth code exchange are kept in process memory,
//! keyed by the access token string. The store is transient by design: entries
//! are lost on restart, and expired entries are dropped on lookup. A production
//! deployment would back this with a database instead.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A token grant held in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredToken {
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub scope: String,
}

impl StoredToken {
    /// Create a grant expiring `expires_in` seconds from now.
    pub fn new(refresh_token: impl Into<String>, expires_in: i64, scope: impl Into<String>) -> Self {
        Self {
            refresh_token: refresh_token.into(),
            expires_at: Utc::now() + Duration::seconds(expires_in),
            scope: scope.into(),
        }
    }

    /// Whether the grant has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Shared in-memory store of access token grants.
///
/// Cloning is cheap; all clones share the same underlying map.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<HashMap<String, StoredToken>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a grant under its access token, replacing any previous entry.
    pub async fn insert(&self, access_token: impl Into<String>, token: StoredToken) {
        self.inner.write().await.insert(access_token.into(), token);
    }

    /// Look up a grant. Expired entries are removed and reported as absent.
    pub async fn get(&self, access_token: &str) -> Option<StoredToken> {
        let mut tokens = self.inner.write().await;
        match tokens.get(access_token) {
            Some(token) if token.is_expired() => {
                debug!("Dropping expired access token from store");
                tokens.remove(access_token);
                None
            }
            Some(token) => Some(token.clone()),
            None => None,
        }
    }

    /// Whether a live grant exists for this access token.
    pub async fn contains(&self, access_token: &str) -> bool {
        self.get(access_token).await.is_some()
    }
}
