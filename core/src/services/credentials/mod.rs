//! Credential verification and password hashing

mod verifier;

#[cfg(test)]
mod tests;

pub use verifier::CredentialVerifier;
