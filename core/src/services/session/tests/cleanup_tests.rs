//! Unit tests for the session cleanup service

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use authgate_shared::SessionConfig;

use crate::clock::Clock;
use crate::domain::entities::{Account, KeyId, Role, TokenClaims};
use crate::repositories::InMemorySessionRepository;
use crate::services::cache::{CookieCache, InMemoryCookieCache};
use crate::services::session::{SessionCleanupService, SessionManager};
use crate::services::test_support::{manual_clock, FailingStore};

#[tokio::test]
async fn test_cleanup_removes_expired_sessions_and_cache_entries() {
    let (clock, shared) = manual_clock();
    let repo = Arc::new(InMemorySessionRepository::new());
    let cache = Arc::new(InMemoryCookieCache::new());
    let manager = Arc::new(SessionManager::new(
        Arc::clone(&repo),
        Arc::clone(&cache),
        SessionConfig::default(),
        shared,
    ));

    let account = Account::new("Ada", "ada@example.com", "hash".into(), Role::Client, clock.now());
    let old = manager.create(account.id).await.unwrap();
    let claims = TokenClaims::build(&old, &account, KeyId::new(1), clock.now(), Duration::minutes(15));
    cache.put(old.id, &claims, old.expires_at).await;

    clock.advance(Duration::days(5));
    let live = manager.create(Uuid::new_v4()).await.unwrap();

    clock.advance(Duration::days(3));
    let service = SessionCleanupService::new(Arc::clone(&manager), std::time::Duration::from_secs(3600));
    let result = service.run_cleanup().await.unwrap();

    assert_eq!(result.expired_sessions_deleted, 1);
    assert_eq!(result.cache_entries_purged, 1);
    assert_eq!(result.total_cleaned(), 2);
    assert_eq!(repo.len().await, 1);
    assert!(manager.validate(live.id).await.is_ok());
}

#[tokio::test]
async fn test_cleanup_reports_store_outage() {
    let (_clock, shared) = manual_clock();
    let manager = Arc::new(SessionManager::new(
        Arc::new(FailingStore),
        Arc::new(InMemoryCookieCache::new()),
        SessionConfig::default(),
        shared,
    ));
    let service = SessionCleanupService::new(manager, std::time::Duration::from_secs(3600));

    let err = service.run_cleanup().await.unwrap_err();
    assert!(err.is_retryable());
}
