//! Signing key ring with snapshot publication

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::jwk::JwkSet;
use ring::rand::SystemRandom;
use ring::signature::{Ed25519KeyPair, KeyPair};
use tracing::info;

use authgate_shared::KeyRotationConfig;

use crate::clock::SharedClock;
use crate::domain::entities::{KeyId, KeyStatus, SigningKeyPair, VerificationKey};
use crate::errors::{DomainError, DomainResult};

/// Immutable view of the ring at one instant
///
/// Exactly one key is active. Superseded keys (grace, then retired) are kept
/// in creation order until purged.
#[derive(Debug)]
pub struct KeyRingSnapshot {
    active: Arc<SigningKeyPair>,
    previous: Vec<Arc<SigningKeyPair>>,
}

impl KeyRingSnapshot {
    pub fn active(&self) -> &Arc<SigningKeyPair> {
        &self.active
    }

    /// Key accepted for verification under `kid`; retired keys are never returned
    pub fn find_verifiable(&self, kid: KeyId) -> Option<&Arc<SigningKeyPair>> {
        self.keys().find(|k| k.kid() == kid && k.is_verifiable())
    }

    /// All keys, oldest first, active last
    pub fn keys(&self) -> impl Iterator<Item = &Arc<SigningKeyPair>> {
        self.previous.iter().chain(std::iter::once(&self.active))
    }

    pub fn verification_keys(&self) -> Vec<VerificationKey> {
        self.keys()
            .filter(|k| k.is_verifiable())
            .map(|k| k.to_verification_key())
            .collect()
    }

    pub fn jwks(&self) -> JwkSet {
        JwkSet {
            keys: self
                .keys()
                .filter(|k| k.is_verifiable())
                .map(|k| k.to_jwk())
                .collect(),
        }
    }

    pub fn key_count(&self) -> usize {
        self.previous.len() + 1
    }

    fn next_kid(&self) -> KeyId {
        self.keys()
            .map(|k| k.kid())
            .max()
            .unwrap_or(self.active.kid())
            .next()
    }
}

/// Outcome of a retirement sweep
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Grace keys moved to retired
    pub retired: Vec<KeyId>,
    /// Retired keys removed from the ring
    pub purged: Vec<KeyId>,
}

impl SweepReport {
    pub fn is_empty(&self) -> bool {
        self.retired.is_empty() && self.purged.is_empty()
    }
}

/// Owner of the signing keys
///
/// Readers clone the current snapshot pointer and never observe a partially
/// updated ring. Writers (rotation and sweeps) serialize on a separate mutex,
/// build a complete new snapshot and swap it in.
pub struct KeyRing {
    current: RwLock<Arc<KeyRingSnapshot>>,
    writer: Mutex<()>,
    config: KeyRotationConfig,
    token_ttl: Duration,
    clock: SharedClock,
}

impl KeyRing {
    /// Creates a ring holding one freshly generated active key
    ///
    /// # Arguments
    ///
    /// * `config` - Rotation interval and grace period
    /// * `token_ttl` - Token lifetime; retired keys are purged once no token
    ///   they signed could still be unexpired
    /// * `clock` - Time source
    pub fn new(
        config: KeyRotationConfig,
        token_ttl: Duration,
        clock: SharedClock,
    ) -> DomainResult<Self> {
        let initial = generate_key(KeyId::new(1), clock.now())?;
        info!(kid = %initial.kid(), "Key ring initialized");

        Ok(Self {
            current: RwLock::new(Arc::new(KeyRingSnapshot {
                active: Arc::new(initial),
                previous: Vec::new(),
            })),
            writer: Mutex::new(()),
            config,
            token_ttl,
            clock,
        })
    }

    /// Current snapshot; cheap, never blocks on writers
    pub fn snapshot(&self) -> Arc<KeyRingSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn active_key(&self) -> Arc<SigningKeyPair> {
        Arc::clone(self.snapshot().active())
    }

    /// Active and grace keys as `{kid, algorithm, public_key}`
    pub fn verification_keys(&self) -> Vec<VerificationKey> {
        self.snapshot().verification_keys()
    }

    /// Active and grace keys as a standard JWK set
    pub fn jwks(&self) -> JwkSet {
        self.snapshot().jwks()
    }

    /// Whether the active key has outlived the rotation interval
    pub fn rotation_due(&self) -> bool {
        let now = self.clock.now();
        now - self.snapshot().active().created_at() >= self.config.rotation_interval()
    }

    /// Generates a new active key and demotes the previous one to grace
    ///
    /// # Returns
    ///
    /// * `Ok(KeyId)` - Identifier of the new active key
    /// * `Err(DomainError::Internal)` - Key generation failed; the ring is unchanged
    pub fn rotate(&self) -> DomainResult<KeyId> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.snapshot();
        let now = self.clock.now();

        let key = generate_key(current.next_kid(), now)?;
        let kid = key.kid();
        let demoted = current.active().kid();

        let mut previous = current.previous.clone();
        previous.push(Arc::new(current.active().demoted(now)));

        self.publish(KeyRingSnapshot {
            active: Arc::new(key),
            previous,
        });

        info!(kid = %kid, demoted = %demoted, "Signing key rotated");
        Ok(kid)
    }

    /// Retires grace keys past the grace period and purges retired keys
    /// whose tokens have all expired
    pub fn sweep_retirement(&self) -> SweepReport {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.snapshot();
        let now = self.clock.now();
        let grace_period = self.config.grace_period();

        let mut report = SweepReport::default();
        let mut previous = Vec::with_capacity(current.previous.len());

        for key in &current.previous {
            match (key.status(), key.demoted_at(), key.retired_at()) {
                (KeyStatus::Grace, Some(demoted_at), _) if now - demoted_at > grace_period => {
                    report.retired.push(key.kid());
                    previous.push(Arc::new(key.retired(now)));
                }
                (KeyStatus::Retired, _, Some(retired_at)) if now > retired_at + self.token_ttl => {
                    report.purged.push(key.kid());
                }
                _ => previous.push(Arc::clone(key)),
            }
        }

        if !report.is_empty() {
            self.publish(KeyRingSnapshot {
                active: Arc::clone(current.active()),
                previous,
            });
            info!(
                retired = ?report.retired,
                purged = ?report.purged,
                "Key retirement sweep applied"
            );
        }

        report
    }

    fn publish(&self, snapshot: KeyRingSnapshot) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(snapshot);
    }
}

impl std::fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRing")
            .field("snapshot", &self.snapshot())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn generate_key(kid: KeyId, now: DateTime<Utc>) -> DomainResult<SigningKeyPair> {
    let rng = SystemRandom::new();
    let pkcs8 = Ed25519KeyPair::generate_pkcs8(&rng)
        .map_err(|_| DomainError::internal("Failed to generate signing key"))?;
    let pair = Ed25519KeyPair::from_pkcs8(pkcs8.as_ref())
        .map_err(|_| DomainError::internal("Generated signing key is unreadable"))?;

    Ok(SigningKeyPair::from_ed25519(
        kid,
        pkcs8.as_ref().to_vec(),
        pair.public_key().as_ref().to_vec(),
        now,
    ))
}
