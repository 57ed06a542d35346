//! Token minting and verification
//!
//! This module handles:
//! - Minting signed tokens bound to a session with the active key
//! - Verifying tokens against the active and grace keys
//! - Classifying verification failures

mod issuer;
mod verifier;

#[cfg(test)]
mod tests;

pub use issuer::{IssuedToken, TokenIssuer};
pub use verifier::TokenVerifier;
