//! Shared utilities and common types for the AuthGate workspace
//!
//! This crate provides common functionality used by the lifecycle engine:
//! - Configuration types (session, token, key rotation, credentials, cache)
//! - Error response structures and error codes
//! - Input validation helpers
//! - Tracing subscriber bootstrap

pub mod config;
pub mod errors;
pub mod telemetry;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AuthConfig, ConfigError, CookieCacheConfig, CredentialConfig, Environment, GatewayConfig,
    KeyRotationConfig, LogFormat, LoggingConfig, SessionConfig, TokenConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use utils::validation;
