//! Token minting

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Header};
use tracing::error;

use authgate_shared::TokenConfig;

use crate::clock::SharedClock;
use crate::domain::entities::{Account, Session, TokenClaims};
use crate::errors::{DomainResult, TokenError};
use crate::services::keys::KeyRing;

/// A freshly minted token with the claims it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: TokenClaims,
}

impl IssuedToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.claims.expires_at_datetime().unwrap_or_default()
    }
}

/// Mints tokens with the key ring's active key
pub struct TokenIssuer {
    key_ring: Arc<KeyRing>,
    config: TokenConfig,
    clock: SharedClock,
}

impl TokenIssuer {
    pub fn new(key_ring: Arc<KeyRing>, config: TokenConfig, clock: SharedClock) -> Self {
        Self {
            key_ring,
            config,
            clock,
        }
    }

    /// Mints a token bound to `session`
    ///
    /// # Arguments
    ///
    /// * `session` - Live session the token represents
    /// * `account` - Account the session authenticates
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - Signed token, `expires_at = now + token_ttl`
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing failed
    pub fn mint(&self, session: &Session, account: &Account) -> DomainResult<IssuedToken> {
        let key = self.key_ring.active_key();
        let claims = TokenClaims::build(
            session,
            account,
            key.kid(),
            self.clock.now(),
            self.config.ttl(),
        );

        let mut header = Header::new(key.algorithm());
        header.typ = None;
        header.kid = Some(key.kid().to_string());

        let token = encode(&header, &claims, key.encoding_key()).map_err(|e| {
            error!(kid = %key.kid(), "Failed to sign token: {}", e);
            TokenError::TokenGenerationFailed
        })?;

        Ok(IssuedToken { token, claims })
    }

    pub fn token_ttl(&self) -> chrono::Duration {
        self.config.ttl()
    }
}
