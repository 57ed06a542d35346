//! Domain-specific error types for credential, session and token operations
//!
//! Error messages are plain English; the transport layer decides how to
//! present them. Each variant carries a stable error code from
//! `authgate_shared::error_codes`.

use authgate_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Credential and session errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    DuplicateAccount,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session expired")]
    SessionExpired,

    #[error("Recent authentication required")]
    ReauthenticationRequired,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::DuplicateAccount => error_codes::DUPLICATE_ACCOUNT,
            AuthError::SessionNotFound => error_codes::SESSION_NOT_FOUND,
            AuthError::SessionExpired => error_codes::SESSION_EXPIRED,
            AuthError::ReauthenticationRequired => error_codes::REAUTHENTICATION_REQUIRED,
        }
    }
}

/// Token minting and verification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    TokenMalformed,

    #[error("Token signature verification failed")]
    TokenSignatureInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Token signed with an unknown key")]
    UnknownSigningKey,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::TokenMalformed => error_codes::TOKEN_MALFORMED,
            TokenError::TokenSignatureInvalid => error_codes::TOKEN_SIGNATURE_INVALID,
            TokenError::TokenExpired => error_codes::TOKEN_EXPIRED,
            TokenError::UnknownSigningKey => error_codes::UNKNOWN_SIGNING_KEY,
            TokenError::TokenGenerationFailed => error_codes::TOKEN_GENERATION_FAILED,
        }
    }
}

/// Input validation errors raised before any store access
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid length: {field} (min: {min}, max: {max})")]
    InvalidLength { field: String, min: usize, max: usize },
}

impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}

impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}

impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string());
        match &err {
            ValidationError::RequiredField { field } | ValidationError::InvalidLength { field, .. } => {
                response.add_detail("field", field)
            }
            ValidationError::InvalidEmail => response.add_detail("field", "email"),
        }
    }
}
