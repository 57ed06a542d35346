//! Cookie cache configuration module

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::auth::env_or;

/// Configuration for the claims cache keyed by session id
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CookieCacheConfig {
    /// Whether the gateway consults the cache at all
    pub enabled: bool,

    /// Maximum age of a cached entry in seconds; entries never outlive their session
    pub max_age: i64,
}

impl Default for CookieCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_age: 7 * 24 * 60 * 60, // 7 days
        }
    }
}

impl CookieCacheConfig {
    /// Override with `AUTHGATE_COOKIE_CACHE_*` variables when set
    pub fn from_env_with(mut config: Self) -> Self {
        config.enabled = env_or("AUTHGATE_COOKIE_CACHE_ENABLED", config.enabled);
        config.max_age = env_or("AUTHGATE_COOKIE_CACHE_MAX_AGE", config.max_age);
        config
    }

    /// Disabled cache configuration
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn max_age(&self) -> Duration {
        Duration::seconds(self.max_age)
    }
}
