//! Account entity as read from the external account store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authgate_shared::validation::validators::normalize_email;

/// Role granted to an account; embedded verbatim in token claims
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Marketing,
    /// Role assigned on self-service signup
    #[default]
    Client,
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Marketing => "marketing",
            Role::Client => "client",
            Role::Agent => "agent",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "marketing" => Ok(Role::Marketing),
            "client" => Ok(Role::Client),
            "agent" => Ok(Role::Agent),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Account record
///
/// The store owns accounts; the engine only reads them, apart from inserting
/// new ones on signup.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Display name supplied on signup
    pub name: String,

    /// Normalized (trimmed, lower-case) email, unique across accounts
    pub email: String,

    /// bcrypt hash of the password
    pub password_hash: String,

    pub role: Role,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with a fresh id and normalized email
    pub fn new(
        name: impl Into<String>,
        email: &str,
        password_hash: String,
        role: Role,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            email: normalize_email(email),
            password_hash,
            role,
            created_at,
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Public projection of an account returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            created_at: account.created_at,
        }
    }
}
