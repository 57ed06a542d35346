//! Gateway facade wiring credentials, sessions, keys and tokens together

use std::sync::Arc;

use jsonwebtoken::jwk::JwkSet;
use tracing::{info, warn};
use uuid::Uuid;

use authgate_shared::validation::validators::normalize_email;
use authgate_shared::{CookieCacheConfig, GatewayConfig};

use crate::clock::SharedClock;
use crate::domain::entities::{Account, AccountView, Role, Session, TokenClaims, VerificationKey};
use crate::domain::value_objects::{AuthResponse, RefreshResponse};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{AccountRepository, SessionRepository};
use crate::services::cache::{CookieCache, NoOpCookieCache};
use crate::services::credentials::CredentialVerifier;
use crate::services::keys::KeyRing;
use crate::services::session::SessionManager;
use crate::services::token::{IssuedToken, TokenIssuer, TokenVerifier};

/// Authentication gateway
///
/// Exposes login, signup, logout, refresh and key discovery over the
/// account and session stores. Background rotation and cleanup attach to the
/// shared [`KeyRing`] and [`SessionManager`] exposed by the accessors.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use authgate_core::{
///     AuthGateway, InMemoryAccountRepository, InMemorySessionRepository, NoOpCookieCache,
///     SharedClock, SystemClock,
/// };
/// use authgate_shared::GatewayConfig;
///
/// # async fn example() -> Result<(), authgate_core::DomainError> {
/// let clock: SharedClock = Arc::new(SystemClock);
/// let gateway: AuthGateway<_, _> = AuthGateway::new(
///     Arc::new(InMemoryAccountRepository::new()),
///     Arc::new(InMemorySessionRepository::new()),
///     Arc::new(NoOpCookieCache),
///     &GatewayConfig::default(),
///     clock,
/// )?;
///
/// let auth = gateway.signup("Ada", "ada@example.com", "correct horse").await?;
/// let refreshed = gateway.refresh(auth.session.id).await?;
/// println!("new token expires at {}", refreshed.expires_at);
/// # Ok(())
/// # }
/// ```
pub struct AuthGateway<A, S, C = NoOpCookieCache>
where
    A: AccountRepository,
    S: SessionRepository,
    C: CookieCache,
{
    accounts: Arc<A>,
    credentials: CredentialVerifier<A>,
    sessions: Arc<SessionManager<S, C>>,
    key_ring: Arc<KeyRing>,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    cache: Arc<C>,
    cache_config: CookieCacheConfig,
    clock: SharedClock,
}

impl<A, S, C> AuthGateway<A, S, C>
where
    A: AccountRepository,
    S: SessionRepository,
    C: CookieCache,
{
    /// Creates a gateway with a freshly initialized key ring
    ///
    /// # Arguments
    ///
    /// * `accounts` - Account store
    /// * `sessions` - Session store
    /// * `cache` - Cookie cache; pass [`NoOpCookieCache`] to run without one
    /// * `config` - Gateway configuration; rejected with `DomainError::Internal`
    ///   when it fails `GatewayConfig::validate`
    /// * `clock` - Time source shared by every component
    pub fn new(
        accounts: Arc<A>,
        sessions: Arc<S>,
        cache: Arc<C>,
        config: &GatewayConfig,
        clock: SharedClock,
    ) -> DomainResult<Self> {
        config.validate()?;
        let key_ring = Arc::new(KeyRing::new(
            config.auth.keys.clone(),
            config.auth.token.ttl(),
            Arc::clone(&clock),
        )?);

        Self::with_key_ring(accounts, sessions, cache, key_ring, config, clock)
    }

    /// Creates a gateway over an existing key ring
    pub fn with_key_ring(
        accounts: Arc<A>,
        sessions: Arc<S>,
        cache: Arc<C>,
        key_ring: Arc<KeyRing>,
        config: &GatewayConfig,
        clock: SharedClock,
    ) -> DomainResult<Self> {
        config.validate()?;
        let credentials =
            CredentialVerifier::new(Arc::clone(&accounts), config.auth.credentials.clone())?;
        let sessions = Arc::new(SessionManager::new(
            sessions,
            Arc::clone(&cache),
            config.auth.session.clone(),
            Arc::clone(&clock),
        ));
        let issuer = TokenIssuer::new(
            Arc::clone(&key_ring),
            config.auth.token.clone(),
            Arc::clone(&clock),
        );
        let verifier = TokenVerifier::new(Arc::clone(&key_ring), Arc::clone(&clock));

        Ok(Self {
            accounts,
            credentials,
            sessions,
            key_ring,
            issuer,
            verifier,
            cache,
            cache_config: config.cookie_cache.clone(),
            clock,
        })
    }

    pub fn key_ring(&self) -> Arc<KeyRing> {
        Arc::clone(&self.key_ring)
    }

    pub fn session_manager(&self) -> Arc<SessionManager<S, C>> {
        Arc::clone(&self.sessions)
    }

    /// Authenticates with email and password and opens a session
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Account view, new session and a token bound to it
    /// * `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// * `Err(DomainError::StoreUnavailable)` - A store was unreachable
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let account = self.credentials.verify(email, password).await?;
        let response = self.open_session(&account).await?;

        info!(account_id = %account.id, session_id = %response.session.id, "Login succeeded");
        Ok(response)
    }

    /// Registers a new client account and opens a session for it
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - As for `login`
    /// * `Err(DomainError::Validation)` - Empty name, bad email or password length
    /// * `Err(AuthError::DuplicateAccount)` - Email already registered
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<AuthResponse> {
        self.credentials.validate_signup(name, email, password)?;

        if self
            .accounts
            .find_by_email(&normalize_email(email))
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateAccount.into());
        }

        let password_hash = self.credentials.hash_password(password).await?;
        let account = Account::new(name, email, password_hash, Role::Client, self.clock.now());
        let account = self.accounts.create(account).await?;

        info!(account_id = %account.id, "Account created");
        self.open_session(&account).await
    }

    /// Revokes a session; succeeds whether or not it existed
    pub async fn logout(&self, session_id: Uuid) -> DomainResult<()> {
        self.sessions.revoke(session_id).await.map(|_| ())
    }

    /// Refreshes a session and mints a new token for it
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshResponse)` - New token and the session's current expiry
    /// * `Err(AuthError::SessionNotFound)` - Unknown or revoked session, or
    ///   its account no longer exists
    /// * `Err(AuthError::SessionExpired)` - Session past its expiry
    pub async fn refresh(&self, session_id: Uuid) -> DomainResult<RefreshResponse> {
        let session = self.sessions.refresh(session_id).await?;

        let Some(account) = self.accounts.find_by_id(session.account_id).await? else {
            warn!(
                session_id = %session_id,
                account_id = %session.account_id,
                "Session belongs to a missing account, revoking"
            );
            self.sessions.revoke(session_id).await?;
            return Err(AuthError::SessionNotFound.into());
        };

        let issued = self.issuer.mint(&session, &account)?;
        self.cache_claims(&session, &issued.claims).await?;

        Ok(RefreshResponse {
            expires_at: issued.expires_at(),
            token: issued.token,
            session_expires_at: session.expires_at,
        })
    }

    /// Active and grace keys as `{kid, algorithm, public_key}`
    pub fn verification_keys(&self) -> Vec<VerificationKey> {
        self.key_ring.verification_keys()
    }

    /// Active and grace keys as a standard JWK set
    pub fn jwks(&self) -> JwkSet {
        self.key_ring.jwks()
    }

    /// Verifies a token and confirms its session is still live
    ///
    /// Unlike plain token verification this reads the session store, so a
    /// revoked session is rejected before its tokens expire.
    pub async fn authenticate(&self, token: &str) -> DomainResult<TokenClaims> {
        let claims = self.verifier.verify(token)?;
        self.sessions.validate(claims.session_id).await?;
        Ok(claims)
    }

    /// Verifies a token without touching any store
    pub fn verify_token(&self, token: &str) -> DomainResult<TokenClaims> {
        self.verifier.verify(token)
    }

    /// Claims of the most recent token for a session, read through the cookie cache
    ///
    /// A cache hit skips the stores entirely. On a miss the session is
    /// validated, the claims are rebuilt for the current active key and cached.
    /// The returned `expires_at` is that of the token they describe, not of the
    /// session.
    pub async fn session_claims(&self, session_id: Uuid) -> DomainResult<TokenClaims> {
        let now = self.clock.now();

        if self.cache_config.enabled {
            if let Some(claims) = self.cache.get(session_id, now).await {
                return Ok(claims);
            }
        }

        let session = self.sessions.validate(session_id).await?;
        let account = self
            .accounts
            .find_by_id(session.account_id)
            .await?
            .ok_or(AuthError::SessionNotFound)?;

        let claims = TokenClaims::build(
            &session,
            &account,
            self.key_ring.active_key().kid(),
            now,
            self.issuer.token_ttl(),
        );
        self.cache_claims(&session, &claims).await?;
        Ok(claims)
    }

    /// Requires a recently authenticated session for a sensitive operation
    pub async fn require_fresh(&self, session_id: Uuid) -> DomainResult<Session> {
        self.sessions.require_fresh(session_id).await
    }

    /// Revokes every session of an account
    pub async fn logout_everywhere(&self, account_id: Uuid) -> DomainResult<usize> {
        self.sessions.revoke_all(account_id).await
    }

    async fn open_session(&self, account: &Account) -> DomainResult<AuthResponse> {
        let session = self.sessions.create(account.id).await?;

        let issued: IssuedToken = match self.issuer.mint(&session, account) {
            Ok(issued) => issued,
            Err(e) => {
                // Roll back the session opened above
                self.sessions.revoke(session.id).await?;
                return Err(e);
            }
        };
        self.cache_claims(&session, &issued.claims).await?;

        let token_expires_at = issued.expires_at();
        Ok(AuthResponse::new(
            AccountView::from(account),
            session,
            issued.token,
            token_expires_at,
        ))
    }

    /// Writes claims to the cookie cache, then confirms the session survived
    ///
    /// A revoke landing between the caller's session read and the write has
    /// already invalidated the cache, so the entry is dropped again here.
    async fn cache_claims(&self, session: &Session, claims: &TokenClaims) -> DomainResult<()> {
        if !self.cache_config.enabled {
            return Ok(());
        }

        let now = self.clock.now();
        let expires_at = (now + self.cache_config.max_age()).min(session.expires_at);
        self.cache.put(session.id, claims, expires_at).await;

        if let Err(e) = self.sessions.validate(session.id).await {
            warn!(session_id = %session.id, "Session ended while caching claims: {}", e);
            self.cache.invalidate(session.id).await;
            return Err(e);
        }
        Ok(())
    }
}
