//! Responses produced by login, signup and refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{AccountView, Session};

/// Result of a successful login or signup
///
/// Carries the public account projection, the new session and a token bound
/// to it. The password hash never leaves the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub account: AccountView,

    pub session: Session,

    /// Signed access token
    pub token: String,

    /// Expiry of `token`
    pub token_expires_at: DateTime<Utc>,
}

impl AuthResponse {
    /// Creates a new authentication response
    ///
    /// # Arguments
    ///
    /// * `account` - Public view of the authenticated account
    /// * `session` - Session opened for this login
    /// * `token` - Token minted for the session
    /// * `token_expires_at` - Token expiry
    pub fn new(
        account: AccountView,
        session: Session,
        token: String,
        token_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            account,
            session,
            token,
            token_expires_at,
        }
    }

    pub fn session_id(&self) -> uuid::Uuid {
        self.session.id
    }
}

/// Result of a session refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Session expiry after the refresh
    pub session_expires_at: DateTime<Utc>,
}
