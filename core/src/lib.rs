//! # AuthGate Core
//!
//! Session and token lifecycle engine for the authentication gateway.
//! This crate contains the domain entities, repository interfaces with
//! in-memory implementations, the error taxonomy and the services that verify
//! credentials, manage sessions, rotate signing keys and mint and verify
//! tokens.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use domain::entities::{
    Account, AccountView, KeyId, KeyStatus, Role, Session, SessionState, SigningKeyPair,
    TokenClaims, VerificationKey,
};
pub use domain::value_objects::{AuthResponse, RefreshResponse};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{
    AccountRepository, InMemoryAccountRepository, InMemorySessionRepository, SessionRepository,
};
pub use services::{
    AuthGateway, CookieCache, CookieCacheEntry, CredentialVerifier, InMemoryCookieCache,
    IssuedToken, KeyRing, KeyRingSnapshot, KeyRotationService, NoOpCookieCache,
    RotationCycleResult, SessionCleanupResult, SessionCleanupService, SessionManager,
    SweepReport, TokenIssuer, TokenVerifier,
};
