//! Signing key ring and its rotation timer
//!
//! This module handles:
//! - Ed25519 key generation
//! - Rotation with a grace window for superseded keys
//! - Retirement and purge sweeps
//! - Publication of verification keys and the JWK set

mod key_ring;
mod rotation;

#[cfg(test)]
mod tests;

pub use key_ring::{KeyRing, KeyRingSnapshot, SweepReport};
pub use rotation::{KeyRotationService, RotationCycleResult};
