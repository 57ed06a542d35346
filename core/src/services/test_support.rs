//! Shared fixtures for service tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use authgate_shared::{CredentialConfig, GatewayConfig};

use crate::clock::{ManualClock, SharedClock};
use crate::domain::entities::{Account, Role, Session};
use crate::errors::DomainError;
use crate::repositories::{
    AccountRepository, InMemoryAccountRepository, InMemorySessionRepository, SessionRepository,
};
use crate::services::cache::InMemoryCookieCache;
use crate::services::gateway::AuthGateway;

pub const TEST_BCRYPT_COST: u32 = 4;

pub type TestGateway =
    AuthGateway<InMemoryAccountRepository, InMemorySessionRepository, InMemoryCookieCache>;

pub fn test_credential_config() -> CredentialConfig {
    CredentialConfig {
        bcrypt_cost: TEST_BCRYPT_COST,
        ..CredentialConfig::default()
    }
}

pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.credentials = test_credential_config();
    config
}

/// Manual clock plus the same clock as a shared handle
pub fn manual_clock() -> (Arc<ManualClock>, SharedClock) {
    let clock = Arc::new(ManualClock::at_epoch());
    let shared: SharedClock = clock.clone();
    (clock, shared)
}

pub fn account_with_password(email: &str, password: &str) -> Account {
    let hash = bcrypt::hash(password, TEST_BCRYPT_COST).unwrap();
    Account::new("Test User", email, hash, Role::Client, Utc::now())
}

pub struct GatewayFixture {
    pub gateway: TestGateway,
    pub clock: Arc<ManualClock>,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
    pub cache: Arc<InMemoryCookieCache>,
}

pub fn gateway_fixture_with(config: GatewayConfig) -> GatewayFixture {
    let (clock, shared) = manual_clock();
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());
    let cache = Arc::new(InMemoryCookieCache::new());

    let gateway = AuthGateway::new(
        Arc::clone(&accounts),
        Arc::clone(&sessions),
        Arc::clone(&cache),
        &config,
        shared,
    )
    .unwrap();

    GatewayFixture {
        gateway,
        clock,
        accounts,
        sessions,
        cache,
    }
}

pub fn gateway_fixture() -> GatewayFixture {
    gateway_fixture_with(test_config())
}

/// Store that is always unreachable
pub struct FailingStore;

fn unreachable_store() -> DomainError {
    DomainError::store("connection refused")
}

#[async_trait]
impl AccountRepository for FailingStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<Account>, DomainError> {
        Err(unreachable_store())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Account>, DomainError> {
        Err(unreachable_store())
    }

    async fn create(&self, _account: Account) -> Result<Account, DomainError> {
        Err(unreachable_store())
    }
}

#[async_trait]
impl SessionRepository for FailingStore {
    async fn create(&self, _session: Session) -> Result<Session, DomainError> {
        Err(unreachable_store())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Session>, DomainError> {
        Err(unreachable_store())
    }

    async fn extend_expiry(
        &self,
        _id: Uuid,
        _expires_at: DateTime<Utc>,
        _refreshed_at: DateTime<Utc>,
    ) -> Result<Option<Session>, DomainError> {
        Err(unreachable_store())
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, DomainError> {
        Err(unreachable_store())
    }

    async fn delete_by_account(&self, _account_id: Uuid) -> Result<usize, DomainError> {
        Err(unreachable_store())
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> Result<usize, DomainError> {
        Err(unreachable_store())
    }

    async fn find_by_account(&self, _account_id: Uuid) -> Result<Vec<Session>, DomainError> {
        Err(unreachable_store())
    }
}
