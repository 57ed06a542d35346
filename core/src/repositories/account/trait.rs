//! Account repository trait
//!
//! The account store is external to the engine. The engine reads accounts by
//! email and id, and inserts new ones on signup; nothing else.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Account;
use crate::errors::DomainError;

/// Repository trait for account lookups and signup inserts
///
/// Implementations map connectivity failures to
/// [`DomainError::StoreUnavailable`].
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its normalized email
    ///
    /// # Arguments
    /// * `email` - Trimmed, lower-case email
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account uses this email
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Insert a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::DuplicateAccount))` - Email already registered
    /// * `Err(DomainError)` - Store error occurred
    async fn create(&self, account: Account) -> Result<Account, DomainError>;
}
