//! Unit tests for the credential verifier

use std::sync::Arc;

use authgate_shared::CredentialConfig;

use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{AccountRepository, InMemoryAccountRepository};
use crate::services::credentials::CredentialVerifier;
use crate::services::test_support::{account_with_password, test_credential_config, FailingStore};

async fn verifier_with(
    email: &str,
    password: &str,
) -> CredentialVerifier<InMemoryAccountRepository> {
    let repo = Arc::new(InMemoryAccountRepository::new());
    repo.create(account_with_password(email, password)).await.unwrap();
    CredentialVerifier::new(repo, test_credential_config()).unwrap()
}

#[tokio::test]
async fn test_verify_accepts_matching_credentials() {
    let verifier = verifier_with("ada@example.com", "correct horse").await;

    let account = verifier.verify("ada@example.com", "correct horse").await.unwrap();
    assert_eq!(account.email, "ada@example.com");
}

#[tokio::test]
async fn test_verify_normalizes_email() {
    let verifier = verifier_with("ada@example.com", "correct horse").await;
    assert!(verifier.verify("  ADA@Example.com ", "correct horse").await.is_ok());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_fail_identically() {
    let verifier = verifier_with("ada@example.com", "correct horse").await;

    let wrong_password = verifier.verify("ada@example.com", "battery staple").await.unwrap_err();
    let unknown_email = verifier.verify("nobody@example.com", "correct horse").await.unwrap_err();

    assert_eq!(wrong_password, DomainError::Auth(AuthError::InvalidCredentials));
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_corrupt_hash_is_a_mismatch() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let mut account = account_with_password("ada@example.com", "correct horse");
    account.password_hash = "not-a-bcrypt-hash".to_string();
    repo.create(account).await.unwrap();

    let verifier = CredentialVerifier::new(repo, test_credential_config()).unwrap();
    let err = verifier.verify("ada@example.com", "correct horse").await.unwrap_err();
    assert_eq!(err, DomainError::Auth(AuthError::InvalidCredentials));
}

#[tokio::test]
async fn test_store_outage_propagates() {
    let verifier = CredentialVerifier::new(Arc::new(FailingStore), test_credential_config()).unwrap();

    let err = verifier.verify("ada@example.com", "whatever").await.unwrap_err();
    assert!(matches!(err, DomainError::StoreUnavailable { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_hash_password_round_trips_through_verify() {
    let verifier = verifier_with("ada@example.com", "correct horse").await;
    let hash = verifier.hash_password("another secret").await.unwrap();

    assert!(hash.starts_with("$2"));
    assert!(bcrypt::verify("another secret", &hash).unwrap());
}

#[test]
fn test_invalid_bcrypt_cost_is_rejected() {
    let config = CredentialConfig {
        bcrypt_cost: 2,
        ..CredentialConfig::default()
    };
    let result = CredentialVerifier::new(Arc::new(InMemoryAccountRepository::new()), config);
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_validate_signup() {
    let verifier = verifier_with("ada@example.com", "correct horse").await;

    assert!(verifier.validate_signup("Ada", "new@example.com", "long enough").is_ok());
    assert_eq!(
        verifier.validate_signup("  ", "new@example.com", "long enough"),
        Err(ValidationError::RequiredField { field: "name".to_string() })
    );
    assert_eq!(
        verifier.validate_signup("Ada", "not-an-email", "long enough"),
        Err(ValidationError::InvalidEmail)
    );
    assert_eq!(
        verifier.validate_signup("Ada", "new@example.com", "short"),
        Err(ValidationError::InvalidLength { field: "password".to_string(), min: 8, max: 128 })
    );
    assert!(verifier
        .validate_signup("Ada", "new@example.com", &"x".repeat(129))
        .is_err());
}
