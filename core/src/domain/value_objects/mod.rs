//! Value objects returned by the gateway operations.

pub mod auth_response;

pub use auth_response::{AuthResponse, RefreshResponse};
