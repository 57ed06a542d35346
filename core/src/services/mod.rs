//! Business services: credentials, sessions, keys, tokens, cache and the gateway facade.

pub mod cache;
pub mod credentials;
pub mod gateway;
pub mod keys;
pub mod session;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::{CookieCache, CookieCacheEntry, InMemoryCookieCache, NoOpCookieCache};
pub use credentials::CredentialVerifier;
pub use gateway::AuthGateway;
pub use keys::{KeyRing, KeyRingSnapshot, KeyRotationService, RotationCycleResult, SweepReport};
pub use session::{SessionCleanupResult, SessionCleanupService, SessionManager};
pub use token::{IssuedToken, TokenIssuer, TokenVerifier};
