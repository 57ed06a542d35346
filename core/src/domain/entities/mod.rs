//! Domain entities: accounts, sessions, signing keys and token claims.

pub mod account;
pub mod claims;
pub mod session;
pub mod signing_key;

pub use account::{Account, AccountView, Role};
pub use claims::TokenClaims;
pub use session::{Session, SessionState};
pub use signing_key::{KeyId, KeyStatus, SigningKeyPair, VerificationKey};
