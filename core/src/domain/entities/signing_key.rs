//! Signing key pairs held by the key ring.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use jsonwebtoken::jwk::{
    AlgorithmParameters, CommonParameters, EllipticCurve, Jwk, KeyAlgorithm,
    OctetKeyPairParameters, OctetKeyPairType, PublicKeyUse,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

/// Key identifier, assigned monotonically by the key ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(u64);

impl KeyId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for KeyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Lifecycle status of a signing key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    /// Signs new tokens; exactly one key is active at any instant
    Active,
    /// Superseded, still accepted for verification
    Grace,
    /// No longer accepted; purged once no token could still carry its signature
    Retired,
}

/// Asymmetric signing key pair
///
/// Instances are immutable once published in a key ring snapshot; status
/// transitions produce new values.
#[derive(Clone)]
pub struct SigningKeyPair {
    kid: KeyId,
    algorithm: Algorithm,
    /// Raw Ed25519 public key (32 bytes)
    public_key: Vec<u8>,
    /// PKCS#8 document holding the private key
    private_key: Vec<u8>,
    created_at: DateTime<Utc>,
    status: KeyStatus,
    demoted_at: Option<DateTime<Utc>>,
    retired_at: Option<DateTime<Utc>>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningKeyPair {
    /// Builds an active Ed25519 key from its PKCS#8 private document and raw public key
    pub fn from_ed25519(
        kid: KeyId,
        private_key_pkcs8: Vec<u8>,
        public_key: Vec<u8>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let encoding_key = EncodingKey::from_ed_der(&private_key_pkcs8);
        let decoding_key = DecodingKey::from_ed_der(&public_key);

        Self {
            kid,
            algorithm: Algorithm::EdDSA,
            public_key,
            private_key: private_key_pkcs8,
            created_at,
            status: KeyStatus::Active,
            demoted_at: None,
            retired_at: None,
            encoding_key,
            decoding_key,
        }
    }

    pub fn kid(&self) -> KeyId {
        self.kid
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> KeyStatus {
        self.status
    }

    pub fn demoted_at(&self) -> Option<DateTime<Utc>> {
        self.demoted_at
    }

    pub fn retired_at(&self) -> Option<DateTime<Utc>> {
        self.retired_at
    }

    /// Whether tokens signed by this key are still accepted
    pub fn is_verifiable(&self) -> bool {
        matches!(self.status, KeyStatus::Active | KeyStatus::Grace)
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Copy of this key moved from active to grace
    pub(crate) fn demoted(&self, at: DateTime<Utc>) -> Self {
        let mut key = self.clone();
        key.status = KeyStatus::Grace;
        key.demoted_at = Some(at);
        key
    }

    /// Copy of this key moved from grace to retired
    pub(crate) fn retired(&self, at: DateTime<Utc>) -> Self {
        let mut key = self.clone();
        key.status = KeyStatus::Retired;
        key.retired_at = Some(at);
        key
    }

    /// Base64url (unpadded) encoding of the public key, as used in JWKs
    pub fn public_key_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.public_key)
    }

    pub fn algorithm_name(&self) -> String {
        format!("{:?}", self.algorithm)
    }

    pub fn to_verification_key(&self) -> VerificationKey {
        VerificationKey {
            kid: self.kid.to_string(),
            algorithm: self.algorithm_name(),
            public_key: self.public_key_base64(),
        }
    }

    /// Standard JWK representation for external key discovery
    pub fn to_jwk(&self) -> Jwk {
        Jwk {
            common: CommonParameters {
                public_key_use: Some(PublicKeyUse::Signature),
                key_algorithm: Some(KeyAlgorithm::EdDSA),
                key_id: Some(self.kid.to_string()),
                ..Default::default()
            },
            algorithm: AlgorithmParameters::OctetKeyPair(OctetKeyPairParameters {
                key_type: OctetKeyPairType::OctetKeyPair,
                curve: EllipticCurve::Ed25519,
                x: self.public_key_base64(),
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn private_key_len(&self) -> usize {
        self.private_key.len()
    }
}

impl std::fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeyPair")
            .field("kid", &self.kid)
            .field("algorithm", &self.algorithm)
            .field("status", &self.status)
            .field("created_at", &self.created_at)
            .field("demoted_at", &self.demoted_at)
            .field("retired_at", &self.retired_at)
            .finish_non_exhaustive()
    }
}

/// Public half of a verification key, as published for external verifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKey {
    pub kid: String,
    pub algorithm: String,
    /// Base64url-encoded public key
    pub public_key: String,
}
