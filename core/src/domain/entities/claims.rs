//! Claims carried in a signed access token.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::account::{Account, Role};
use super::session::Session;
use super::signing_key::KeyId;

/// Token payload
///
/// Serialized as camelCase JSON with second-resolution timestamps. The `kid`
/// travels in the token header, not the payload, and is filled in after
/// verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenClaims {
    pub account_id: Uuid,
    pub email: String,
    pub role: Role,
    pub session_id: Uuid,
    /// Issued-at, seconds since the Unix epoch
    pub issued_at: i64,
    /// Expiry, seconds since the Unix epoch
    pub expires_at: i64,
    #[serde(skip)]
    pub kid: Option<KeyId>,
}

impl TokenClaims {
    /// Assembles the claims for a token bound to `session`
    ///
    /// Pure: the same inputs always yield the same claims.
    ///
    /// # Arguments
    ///
    /// * `session` - Session the token is bound to
    /// * `account` - Account the session authenticates
    /// * `kid` - Identifier of the key that will sign the token
    /// * `now` - Issue instant
    /// * `ttl` - Token lifetime
    pub fn build(
        session: &Session,
        account: &Account,
        kid: KeyId,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            account_id: account.id,
            email: account.email.clone(),
            role: account.role,
            session_id: session.id,
            issued_at: now.timestamp(),
            expires_at: (now + ttl).timestamp(),
            kid: Some(kid),
        }
    }

    /// Whether the token is past its expiry; the expiry second itself is still valid
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.expires_at
    }

    pub fn expires_at_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }

    pub fn with_kid(mut self, kid: KeyId) -> Self {
        self.kid = Some(kid);
        self
    }
}
