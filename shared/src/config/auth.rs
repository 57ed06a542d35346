//! Authentication lifecycle configuration
//!
//! All durations are expressed in seconds, matching the way they are written
//! in TOML files and environment variables. Accessors return `chrono::Duration`
//! for use in timestamp arithmetic.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Session lifetime windows
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session lifetime in seconds (fixed at creation, extended on refresh)
    pub expires_in: i64,

    /// Seconds since the last refresh after which a refresh slides the expiry
    pub update_age: i64,

    /// Seconds after creation during which the session counts as fresh
    pub fresh_age: i64,

    /// Seconds between expired-session cleanup cycles
    pub cleanup_interval: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expires_in: 7 * 24 * 60 * 60, // 7 days
            update_age: 24 * 60 * 60,     // 1 day
            fresh_age: 5 * 60,            // 5 minutes
            cleanup_interval: 60 * 60,    // 1 hour
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.expires_in)
    }

    pub fn update_age(&self) -> Duration {
        Duration::seconds(self.update_age)
    }

    pub fn fresh_age(&self) -> Duration {
        Duration::seconds(self.fresh_age)
    }

    pub fn cleanup_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.cleanup_interval)
    }
}

/// Signed token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Token lifetime in seconds
    pub expires_in: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            expires_in: 15 * 60, // 15 minutes
        }
    }
}

impl TokenConfig {
    /// Set token lifetime in minutes
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.expires_in = minutes * 60;
        self
    }

    pub fn ttl(&self) -> Duration {
        Duration::seconds(self.expires_in)
    }
}

/// Signing key rotation schedule
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyRotationConfig {
    /// Age in seconds after which the active key is replaced
    pub rotation_interval: i64,

    /// Seconds a demoted key stays in the verification set
    pub grace_period: i64,

    /// How often the rotation timer wakes up, in seconds
    pub sweep_interval: u64,

    /// Whether the background rotation task should run at all
    pub enabled: bool,
}

impl Default for KeyRotationConfig {
    fn default() -> Self {
        Self {
            rotation_interval: 30 * 24 * 60 * 60, // 30 days
            grace_period: 7 * 24 * 60 * 60,       // 7 days
            sweep_interval: 60 * 60,              // hourly
            enabled: true,
        }
    }
}

impl KeyRotationConfig {
    pub fn rotation_interval(&self) -> Duration {
        Duration::seconds(self.rotation_interval)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::seconds(self.grace_period)
    }

    pub fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval)
    }
}

/// Password hashing and policy
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CredentialConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,

    /// Minimum accepted password length on signup
    pub min_password_length: usize,

    /// Maximum accepted password length on signup
    pub max_password_length: usize,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            min_password_length: 8,
            max_password_length: 128,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Session configuration
    pub session: SessionConfig,

    /// Token configuration
    pub token: TokenConfig,

    /// Key rotation configuration
    pub keys: KeyRotationConfig,

    /// Credential configuration
    pub credentials: CredentialConfig,
}

impl AuthConfig {
    /// Override the given configuration with any `AUTHGATE_*` variables set
    pub fn from_env_with(mut config: Self) -> Self {
        config.session.expires_in = env_or("AUTHGATE_SESSION_EXPIRES_IN", config.session.expires_in);
        config.session.update_age = env_or("AUTHGATE_SESSION_UPDATE_AGE", config.session.update_age);
        config.session.fresh_age = env_or("AUTHGATE_SESSION_FRESH_AGE", config.session.fresh_age);
        config.session.cleanup_interval =
            env_or("AUTHGATE_SESSION_CLEANUP_INTERVAL", config.session.cleanup_interval);
        config.token.expires_in = env_or("AUTHGATE_TOKEN_EXPIRES_IN", config.token.expires_in);
        config.keys.rotation_interval =
            env_or("AUTHGATE_KEY_ROTATION_INTERVAL", config.keys.rotation_interval);
        config.keys.grace_period = env_or("AUTHGATE_KEY_GRACE_PERIOD", config.keys.grace_period);
        config.keys.sweep_interval = env_or("AUTHGATE_KEY_SWEEP_INTERVAL", config.keys.sweep_interval);
        config.credentials.bcrypt_cost =
            env_or("AUTHGATE_BCRYPT_COST", config.credentials.bcrypt_cost);
        config
    }
}

pub(crate) fn env_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl(), Duration::days(7));
        assert_eq!(config.update_age(), Duration::hours(24));
        assert_eq!(config.fresh_age(), Duration::minutes(5));
        assert_eq!(config.cleanup_interval(), std::time::Duration::from_secs(3600));
    }

    #[test]
    fn test_token_config_builder() {
        let config = TokenConfig::default().with_expiry_minutes(30);
        assert_eq!(config.expires_in, 1800);
        assert_eq!(config.ttl(), Duration::minutes(30));
    }

    #[test]
    fn test_key_rotation_defaults() {
        let config = KeyRotationConfig::default();
        assert_eq!(config.rotation_interval(), Duration::days(30));
        assert_eq!(config.grace_period(), Duration::days(7));
        assert_eq!(config.sweep_interval(), std::time::Duration::from_secs(3600));
    }

    #[test]
    fn test_env_or_ignores_unparsable_values() {
        std::env::set_var("AUTHGATE_TEST_ENV_OR", "not-a-number");
        assert_eq!(env_or("AUTHGATE_TEST_ENV_OR", 42i64), 42);
        std::env::set_var("AUTHGATE_TEST_ENV_OR", "7");
        assert_eq!(env_or("AUTHGATE_TEST_ENV_OR", 42i64), 7);
        std::env::remove_var("AUTHGATE_TEST_ENV_OR");
    }
}
