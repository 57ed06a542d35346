//! Session manager
//!
//! Owns every session mutation. A session moves Fresh -> Stale -> Expired
//! with time; revocation deletes it from any state.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use authgate_shared::SessionConfig;

use crate::clock::SharedClock;
use crate::domain::entities::{Session, SessionState};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::SessionRepository;
use crate::services::cache::CookieCache;

/// Enforces the fresh, update and expiry windows
pub struct SessionManager<S: SessionRepository, C: CookieCache> {
    sessions: Arc<S>,
    cache: Arc<C>,
    config: SessionConfig,
    clock: SharedClock,
}

impl<S: SessionRepository, C: CookieCache> SessionManager<S, C> {
    /// Creates a new session manager
    ///
    /// # Arguments
    ///
    /// * `sessions` - Session store
    /// * `cache` - Cookie cache whose entries are invalidated on refresh and revoke
    /// * `config` - Session windows
    /// * `clock` - Time source
    pub fn new(sessions: Arc<S>, cache: Arc<C>, config: SessionConfig, clock: SharedClock) -> Self {
        Self {
            sessions,
            cache,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Opens a session for an authenticated account
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - `expires_at = now + session_ttl`
    /// * `Err(DomainError::StoreUnavailable)` - Session store unreachable
    pub async fn create(&self, account_id: Uuid) -> DomainResult<Session> {
        let session = Session::new(account_id, self.clock.now(), self.config.ttl());
        let session = self.sessions.create(session).await?;

        info!(session_id = %session.id, account_id = %account_id, "Session created");
        Ok(session)
    }

    /// Loads a session and checks it has not expired
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Live session
    /// * `Err(AuthError::SessionNotFound)` - Never existed, revoked or purged
    /// * `Err(AuthError::SessionExpired)` - `now > expires_at`
    pub async fn validate(&self, session_id: Uuid) -> DomainResult<Session> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired(self.clock.now()) {
            return Err(AuthError::SessionExpired.into());
        }

        Ok(session)
    }

    /// Re-validates a session and slides its expiry when the update window has passed
    ///
    /// When `now - last_refreshed_at > update_age` the expiry becomes
    /// `now + session_ttl`. The store applies it as a monotonic maximum, so a
    /// concurrent refresh can never shorten the session. The cookie cache
    /// entry is dropped either way.
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - The session after the refresh
    /// * `Err(AuthError::SessionNotFound)` - Absent, or revoked mid-refresh
    /// * `Err(AuthError::SessionExpired)` - Already expired; never revived
    pub async fn refresh(&self, session_id: Uuid) -> DomainResult<Session> {
        let session = self.validate(session_id).await?;
        let now = self.clock.now();

        let session = if session.needs_renewal(now, self.config.update_age()) {
            let extended = self
                .sessions
                .extend_expiry(session_id, now + self.config.ttl(), now)
                .await?
                .ok_or(AuthError::SessionNotFound)?;

            debug!(
                session_id = %session_id,
                expires_at = %extended.expires_at,
                "Session expiry extended"
            );
            extended
        } else {
            session
        };

        self.cache.invalidate(session_id).await;
        Ok(session)
    }

    /// Revokes a session; revoking an absent session succeeds
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The session existed and was deleted
    /// * `Ok(false)` - Nothing to revoke
    pub async fn revoke(&self, session_id: Uuid) -> DomainResult<bool> {
        let deleted = self.sessions.delete(session_id).await?;
        self.cache.invalidate(session_id).await;

        if deleted {
            info!(session_id = %session_id, "Session revoked");
        }
        Ok(deleted)
    }

    /// Revokes every session of an account, returning how many were deleted
    pub async fn revoke_all(&self, account_id: Uuid) -> DomainResult<usize> {
        let sessions = self.sessions.find_by_account(account_id).await?;
        let deleted = self.sessions.delete_by_account(account_id).await?;

        for session in &sessions {
            self.cache.invalidate(session.id).await;
        }

        info!(account_id = %account_id, revoked = deleted, "All sessions revoked");
        Ok(deleted)
    }

    /// Freshness tier of a session at the current time
    pub fn state(&self, session: &Session) -> SessionState {
        session.state(self.clock.now(), self.config.fresh_age())
    }

    /// Validates a session and requires it to be fresh
    ///
    /// Gate for sensitive operations: a stale session must re-enter
    /// credentials.
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Live and fresh
    /// * `Err(AuthError::ReauthenticationRequired)` - Live but stale
    /// * `Err(AuthError::SessionNotFound | SessionExpired)` - As for `validate`
    pub async fn require_fresh(&self, session_id: Uuid) -> DomainResult<Session> {
        let session = self.validate(session_id).await?;

        match self.state(&session) {
            SessionState::Fresh => Ok(session),
            SessionState::Stale => Err(AuthError::ReauthenticationRequired.into()),
            SessionState::Expired => Err(AuthError::SessionExpired.into()),
        }
    }

    /// Deletes expired sessions and expired cache entries
    ///
    /// # Returns
    ///
    /// * `Ok((sessions, cache_entries))` - Counts removed
    pub async fn purge_expired(&self) -> DomainResult<(usize, usize)> {
        let now = self.clock.now();
        let sessions = self.sessions.delete_expired(now).await?;
        let cache_entries = self.cache.purge_expired(now).await;
        Ok((sessions, cache_entries))
    }
}
