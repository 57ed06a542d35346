//! Unit tests for the in-memory session repository

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::Session;
use crate::repositories::session::{InMemorySessionRepository, SessionRepository};

fn t0() -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_735_689_600, 0).unwrap()
}

#[tokio::test]
async fn test_create_find_delete() {
    let repo = InMemorySessionRepository::new();
    let session = repo
        .create(Session::new(Uuid::new_v4(), t0(), Duration::days(7)))
        .await
        .unwrap();

    assert_eq!(repo.find_by_id(session.id).await.unwrap(), Some(session.clone()));
    assert!(repo.delete(session.id).await.unwrap());
    assert!(!repo.delete(session.id).await.unwrap());
    assert!(repo.find_by_id(session.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_extend_expiry_never_moves_backwards() {
    let repo = InMemorySessionRepository::new();
    let session = repo
        .create(Session::new(Uuid::new_v4(), t0(), Duration::days(7)))
        .await
        .unwrap();

    let later = t0() + Duration::days(9);
    let extended = repo
        .extend_expiry(session.id, later, t0() + Duration::days(2))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(extended.expires_at, later);

    // A stale writer arriving late must not shorten the session
    let stale = repo
        .extend_expiry(session.id, t0() + Duration::days(8), t0() + Duration::days(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stale.expires_at, later);
    assert_eq!(stale.last_refreshed_at, t0() + Duration::days(2));
}

#[tokio::test]
async fn test_extend_expiry_on_missing_session() {
    let repo = InMemorySessionRepository::new();
    let result = repo.extend_expiry(Uuid::new_v4(), t0(), t0()).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_by_account_and_expired() {
    let repo = InMemorySessionRepository::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.create(Session::new(alice, t0(), Duration::days(7))).await.unwrap();
    repo.create(Session::new(alice, t0(), Duration::days(7))).await.unwrap();
    repo.create(Session::new(bob, t0(), Duration::hours(1))).await.unwrap();
    repo.create(Session::new(bob, t0(), Duration::days(7))).await.unwrap();

    assert_eq!(repo.find_by_account(alice).await.unwrap().len(), 2);
    assert_eq!(repo.delete_by_account(alice).await.unwrap(), 2);
    assert_eq!(repo.len().await, 2);

    assert_eq!(repo.delete_expired(t0() + Duration::hours(2)).await.unwrap(), 1);
    assert_eq!(repo.find_by_account(bob).await.unwrap().len(), 1);
}
