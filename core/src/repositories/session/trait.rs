//! Session repository trait
//!
//! Sessions are mutated only through the session manager. The store's one
//! non-trivial duty is `extend_expiry`, which must apply the new expiry as a
//! monotonic maximum so concurrent refreshes never move it backwards.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::Session;
use crate::errors::DomainError;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a newly created session
    async fn create(&self, session: Session) -> Result<Session, DomainError>;

    /// Find a session by id
    ///
    /// # Returns
    /// * `Ok(Some(Session))` - Session found, expired or not
    /// * `Ok(None)` - No such session (never created, revoked or purged)
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Session>, DomainError>;

    /// Atomically slide a session's expiry forward
    ///
    /// Sets `expires_at = max(current, expires_at)` and
    /// `last_refreshed_at = max(current, refreshed_at)` in one step.
    ///
    /// # Returns
    /// * `Ok(Some(Session))` - The session as stored after the update
    /// * `Ok(None)` - The session no longer exists
    /// * `Err(DomainError)` - Store error occurred
    async fn extend_expiry(
        &self,
        id: Uuid,
        expires_at: DateTime<Utc>,
        refreshed_at: DateTime<Utc>,
    ) -> Result<Option<Session>, DomainError>;

    /// Delete a session
    ///
    /// # Returns
    /// * `Ok(true)` - Session was deleted
    /// * `Ok(false)` - Session not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete every session of an account, returning how many were removed
    async fn delete_by_account(&self, account_id: Uuid) -> Result<usize, DomainError>;

    /// Delete sessions with `expires_at < now`, returning how many were removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Sessions belonging to an account
    async fn find_by_account(&self, account_id: Uuid) -> Result<Vec<Session>, DomainError>;
}
