use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::domain::entities::{KeyId, TokenClaims};

/// Claims cache keyed by session id
#[async_trait]
pub trait CookieCache: Send + Sync {
    /// Cached claims for a session, if present and not past `expires_at`
    async fn get(&self, session_id: Uuid, now: DateTime<Utc>) -> Option<TokenClaims>;

    /// Store claims for a session until `expires_at`
    async fn put(&self, session_id: Uuid, claims: &TokenClaims, expires_at: DateTime<Utc>);

    /// Drop the entry for a session; no-op when absent
    async fn invalidate(&self, session_id: Uuid);

    /// Drop entries past their expiry, returning how many were removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> usize;
}

/// Cached entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieCacheEntry {
    pub session_id: Uuid,
    /// Claims as JSON, in token payload shape
    pub serialized_claims: String,
    pub kid: Option<KeyId>,
    pub expires_at: DateTime<Utc>,
}

impl CookieCacheEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Process-local cookie cache
#[derive(Clone, Default)]
pub struct InMemoryCookieCache {
    entries: Arc<RwLock<HashMap<Uuid, CookieCacheEntry>>>,
}

impl InMemoryCookieCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn entry(&self, session_id: Uuid) -> Option<CookieCacheEntry> {
        self.entries.read().await.get(&session_id).cloned()
    }
}

#[async_trait]
impl CookieCache for InMemoryCookieCache {
    async fn get(&self, session_id: Uuid, now: DateTime<Utc>) -> Option<TokenClaims> {
        let entries = self.entries.read().await;
        let entry = entries.get(&session_id).filter(|e| !e.is_expired(now))?;

        match serde_json::from_str::<TokenClaims>(&entry.serialized_claims) {
            Ok(mut claims) => {
                claims.kid = entry.kid;
                Some(claims)
            }
            Err(e) => {
                warn!(session_id = %session_id, "Discarding unreadable cache entry: {}", e);
                None
            }
        }
    }

    async fn put(&self, session_id: Uuid, claims: &TokenClaims, expires_at: DateTime<Utc>) {
        let serialized_claims = match serde_json::to_string(claims) {
            Ok(json) => json,
            Err(e) => {
                warn!(session_id = %session_id, "Failed to serialize claims for cache: {}", e);
                return;
            }
        };

        self.entries.write().await.insert(
            session_id,
            CookieCacheEntry {
                session_id,
                serialized_claims,
                kid: claims.kid,
                expires_at,
            },
        );
    }

    async fn invalidate(&self, session_id: Uuid) {
        self.entries.write().await.remove(&session_id);
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        before - entries.len()
    }
}

/// Cache that stores nothing; used when the accelerator is disabled
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCookieCache;

#[async_trait]
impl CookieCache for NoOpCookieCache {
    async fn get(&self, _session_id: Uuid, _now: DateTime<Utc>) -> Option<TokenClaims> {
        None
    }

    async fn put(&self, _session_id: Uuid, _claims: &TokenClaims, _expires_at: DateTime<Utc>) {}

    async fn invalidate(&self, _session_id: Uuid) {}

    async fn purge_expired(&self, _now: DateTime<Utc>) -> usize {
        0
    }
}
