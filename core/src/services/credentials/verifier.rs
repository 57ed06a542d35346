//! Constant-cost credential verification

use std::sync::Arc;

use tracing::{debug, error, warn};

use authgate_shared::validation::validators::{
    is_valid_email, length_between, normalize_email, not_empty,
};
use authgate_shared::CredentialConfig;

use crate::domain::entities::Account;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::AccountRepository;

/// Plaintext hashed once at construction to equalize unknown-email timing
const DUMMY_PASSWORD: &str = "authgate-dummy-password";

/// Checks submitted credentials against stored accounts
///
/// Unknown emails and wrong passwords fail identically and take the same
/// bcrypt work, so response timing does not reveal which accounts exist.
pub struct CredentialVerifier<A: AccountRepository> {
    accounts: Arc<A>,
    config: CredentialConfig,
    dummy_hash: String,
}

impl<A: AccountRepository> CredentialVerifier<A> {
    /// Creates a new verifier
    ///
    /// # Arguments
    ///
    /// * `accounts` - Account store
    /// * `config` - bcrypt cost and password length bounds
    ///
    /// # Returns
    ///
    /// * `Ok(CredentialVerifier)` - Ready to verify
    /// * `Err(DomainError::Internal)` - The configured bcrypt cost is rejected
    pub fn new(accounts: Arc<A>, config: CredentialConfig) -> DomainResult<Self> {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, config.bcrypt_cost)
            .map_err(|e| DomainError::internal(format!("Failed to prepare dummy hash: {}", e)))?;

        Ok(Self {
            accounts,
            config,
            dummy_hash,
        })
    }

    /// Verifies an email/password pair
    ///
    /// # Arguments
    ///
    /// * `email` - Submitted email; normalized before lookup
    /// * `password` - Submitted plaintext password
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - Credentials match
    /// * `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// * `Err(DomainError::StoreUnavailable)` - Account store unreachable
    pub async fn verify(&self, email: &str, password: &str) -> DomainResult<Account> {
        let email = normalize_email(email);
        let account = self.accounts.find_by_email(&email).await?;

        let hash = match &account {
            Some(account) => account.password_hash.clone(),
            None => self.dummy_hash.clone(),
        };
        let matches = self.check_password(password, hash).await?;

        match account {
            Some(account) if matches => {
                debug!(account_id = %account.id, "Credentials verified");
                Ok(account)
            }
            _ => {
                warn!("Credential verification failed");
                Err(AuthError::InvalidCredentials.into())
            }
        }
    }

    /// Hashes a password with the configured bcrypt cost
    pub async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let password = password.to_owned();
        let cost = self.config.bcrypt_cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
    }

    /// Validates signup input before any store access
    ///
    /// Checks, in order: non-empty name, email syntax, password length.
    pub fn validate_signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ValidationError> {
        if !not_empty(name) {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            });
        }

        if !is_valid_email(&normalize_email(email)) {
            return Err(ValidationError::InvalidEmail);
        }

        let (min, max) = (
            self.config.min_password_length,
            self.config.max_password_length,
        );
        if !length_between(password, min, max) {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                min,
                max,
            });
        }

        Ok(())
    }

    async fn check_password(&self, password: &str, hash: String) -> DomainResult<bool> {
        let password = password.to_owned();

        let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| DomainError::internal(format!("Password check task failed: {}", e)))?;

        // A corrupt stored hash can never match
        Ok(result.unwrap_or_else(|e| {
            error!("Stored password hash is unreadable: {}", e);
            false
        }))
    }
}
