//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError, ValidationError};

use authgate_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use authgate_shared::ConfigError;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The external account/session store could not be reached
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DomainError {
    pub fn store(message: impl Into<String>) -> Self {
        DomainError::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Only store outages may be retried by the caller; every other error is
    /// terminal for the attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::StoreUnavailable { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::StoreUnavailable { .. } => error_codes::STORE_UNAVAILABLE,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(err) => err.error_code(),
            DomainError::Token(err) => err.error_code(),
            DomainError::Validation(_) => error_codes::VALIDATION_ERROR,
        }
    }
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        DomainError::internal(err.to_string())
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Auth(err) => err.clone().into(),
            DomainError::Token(err) => err.clone().into(),
            DomainError::Validation(err) => err.clone().into(),
            // Store and internal details stay in the logs
            DomainError::StoreUnavailable { .. } => {
                ErrorResponse::new(self.error_code(), "Service temporarily unavailable")
                    .retryable(true)
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(self.error_code(), "Internal error")
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
