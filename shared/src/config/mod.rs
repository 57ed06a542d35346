//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Session windows, token lifetime, key rotation and credential hashing
//! - `cache` - Cookie cache accelerator
//! - `environment` - Deployment environment detection
//! - `logging` - Log level and output format

pub mod auth;
pub mod cache;
pub mod environment;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, CredentialConfig, KeyRotationConfig, SessionConfig, TokenConfig};
pub use cache::CookieCacheConfig;
pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};

/// Prefix for environment variable overrides (`AUTHGATE__AUTH__SESSION__EXPIRES_IN=3600`)
pub const ENV_PREFIX: &str = "AUTHGATE";

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Complete gateway configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Session, token, key and credential configuration
    pub auth: AuthConfig,

    /// Cookie cache configuration
    pub cookie_cache: CookieCacheConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl GatewayConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self::for_environment(Environment::Development)
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self::for_environment(Environment::Production)
    }

    /// Defaults for `env`; only logging differs between environments
    pub fn for_environment(env: Environment) -> Self {
        Self {
            environment: env,
            auth: AuthConfig::default(),
            cookie_cache: CookieCacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }

    /// Load configuration from `AUTHGATE_*` environment variables
    ///
    /// A `.env` file in the working directory is honoured when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = Self::for_environment(Environment::from_env());
        config.auth = AuthConfig::from_env_with(config.auth);
        config.cookie_cache = CookieCacheConfig::from_env_with(config.cookie_cache);
        config.logging = LoggingConfig::from_env_with(config.logging);

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional TOML file layered with
    /// `AUTHGATE__*` environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_layered(Self::default(), path.as_ref())
    }

    /// Load `authgate.<environment>.toml` from `dir` for the environment named
    /// by `AUTHGATE_ENV`
    ///
    /// Values absent from the file fall back to that environment's defaults.
    pub fn load_for_environment(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let env = Environment::from_env();
        let mut config =
            Self::load_layered(Self::for_environment(env), &dir.as_ref().join(env.config_file()))?;
        config.environment = env;
        Ok(config)
    }

    fn load_layered(base: Self, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = ::config::Config::builder()
            .add_source(::config::Config::try_from(&base)?)
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check the bounds and cross-field invariants the lifecycle engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let session = &self.auth.session;
        require_lifetime("auth.session.expires_in", session.expires_in, 1)?;
        require_lifetime("auth.session.update_age", session.update_age, 0)?;
        require_lifetime("auth.session.fresh_age", session.fresh_age, 0)?;
        require_interval("auth.session.cleanup_interval", session.cleanup_interval)?;

        require_lifetime("auth.token.expires_in", self.auth.token.expires_in, 1)?;

        let keys = &self.auth.keys;
        require_lifetime("auth.keys.rotation_interval", keys.rotation_interval, 1)?;
        require_lifetime("auth.keys.grace_period", keys.grace_period, 0)?;
        require_interval("auth.keys.sweep_interval", keys.sweep_interval)?;
        if keys.grace_period < self.auth.token.expires_in {
            return Err(invalid(
                "auth.keys.grace_period",
                "must cover at least one token lifetime",
            ));
        }

        require_lifetime("cookie_cache.max_age", self.cookie_cache.max_age, 1)?;

        let credentials = &self.auth.credentials;
        if !(4..=31).contains(&credentials.bcrypt_cost) {
            return Err(invalid("auth.credentials.bcrypt_cost", "must be between 4 and 31"));
        }
        if credentials.min_password_length > credentials.max_password_length {
            return Err(invalid(
                "auth.credentials",
                "min_password_length exceeds max_password_length",
            ));
        }
        Ok(())
    }
}

/// Longest accepted lifetime or interval, in seconds (ten years)
pub const MAX_DURATION_SECS: i64 = 10 * 365 * 24 * 60 * 60;

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn require_lifetime(field: &str, seconds: i64, min: i64) -> Result<(), ConfigError> {
    if seconds < min || seconds > MAX_DURATION_SECS {
        return Err(invalid(
            field,
            format!("must be between {} and {} seconds", min, MAX_DURATION_SECS),
        ));
    }
    Ok(())
}

fn require_interval(field: &str, seconds: u64) -> Result<(), ConfigError> {
    if seconds == 0 || seconds > MAX_DURATION_SECS as u64 {
        return Err(invalid(
            field,
            format!("must be between 1 and {} seconds", MAX_DURATION_SECS),
        ));
    }
    Ok(())
}
