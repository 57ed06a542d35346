//! Unit tests for domain error types

use authgate_shared::errors::{ErrorResponse, IntoErrorResponse};

use crate::errors::{AuthError, DomainError, TokenError, ValidationError};

#[test]
fn test_auth_error_messages() {
    assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid email or password");
    assert_eq!(AuthError::SessionExpired.error_code(), "SESSION_EXPIRED");
}

#[test]
fn test_token_error_conversion() {
    let response: ErrorResponse = TokenError::TokenExpired.into();
    assert_eq!(response.error, "TOKEN_EXPIRED");
    assert_eq!(response.message, "Token expired");
    assert!(!response.retryable);
}

#[test]
fn test_validation_error_carries_field() {
    let error = ValidationError::InvalidLength {
        field: "password".to_string(),
        min: 8,
        max: 128,
    };
    let response: ErrorResponse = error.into();
    assert_eq!(response.error, "VALIDATION_ERROR");
    assert_eq!(response.details.unwrap()["field"], "password");
}

#[test]
fn test_only_store_errors_are_retryable() {
    assert!(DomainError::store("connection refused").is_retryable());
    assert!(!DomainError::from(AuthError::SessionNotFound).is_retryable());
    assert!(!DomainError::from(TokenError::UnknownSigningKey).is_retryable());
    assert!(!DomainError::internal("boom").is_retryable());
}

#[test]
fn test_store_error_response_hides_details() {
    let response = DomainError::store("pg: connection refused on 10.0.0.3").to_error_response();
    assert_eq!(response.error, "STORE_UNAVAILABLE");
    assert!(response.retryable);
    assert!(!response.message.contains("10.0.0.3"));
}

#[test]
fn test_bridged_error_codes() {
    assert_eq!(DomainError::from(AuthError::DuplicateAccount).error_code(), "DUPLICATE_ACCOUNT");
    assert_eq!(DomainError::from(TokenError::TokenMalformed).error_code(), "TOKEN_MALFORMED");
    assert_eq!(
        DomainError::from(ValidationError::InvalidEmail).error_code(),
        "VALIDATION_ERROR"
    );
}
