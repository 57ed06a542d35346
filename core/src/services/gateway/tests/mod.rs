//! Tests for the gateway operations
