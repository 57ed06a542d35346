//! Session cleanup service for periodic removal of expired sessions
//!
//! Expired sessions already fail validation; this keeps the store and the
//! cookie cache bounded.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::errors::DomainError;
use crate::repositories::SessionRepository;
use crate::services::cache::CookieCache;

use super::manager::SessionManager;

/// Service for cleaning up expired sessions and cache entries
pub struct SessionCleanupService<S: SessionRepository + 'static, C: CookieCache + 'static> {
    manager: Arc<SessionManager<S, C>>,
    interval: std::time::Duration,
}

impl<S: SessionRepository + 'static, C: CookieCache + 'static> SessionCleanupService<S, C> {
    /// Create a new session cleanup service running every `interval`
    pub fn new(manager: Arc<SessionManager<S, C>>, interval: std::time::Duration) -> Self {
        Self { manager, interval }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(SessionCleanupResult)` - Summary of cleanup operations
    /// * `Err(DomainError)` - The session store failed
    pub async fn run_cleanup(&self) -> Result<SessionCleanupResult, DomainError> {
        let (expired_sessions_deleted, cache_entries_purged) =
            self.manager.purge_expired().await?;

        let result = SessionCleanupResult {
            expired_sessions_deleted,
            cache_entries_purged,
        };

        if result.total_cleaned() > 0 {
            info!(
                "Session cleanup completed - Sessions: {}, Cache entries: {}",
                result.expired_sessions_deleted, result.cache_entries_purged
            );
        }

        Ok(result)
    }

    /// Start the cleanup service as a background task
    pub fn start_background_task(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Session cleanup service started - will run every {} seconds",
                self.interval.as_secs()
            );

            let mut interval_timer = tokio::time::interval(self.interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    if e.is_retryable() {
                        warn!("Session cleanup skipped, store unavailable: {}", e);
                    } else {
                        error!("Session cleanup cycle failed: {}", e);
                    }
                }
            }
        })
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionCleanupResult {
    /// Number of expired sessions deleted
    pub expired_sessions_deleted: usize,
    /// Number of expired cookie cache entries purged
    pub cache_entries_purged: usize,
}

impl SessionCleanupResult {
    /// Get total number of items cleaned up
    pub fn total_cleaned(&self) -> usize {
        self.expired_sessions_deleted + self.cache_entries_purged
    }
}
