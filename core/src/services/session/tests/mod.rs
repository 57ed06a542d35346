//! Tests for session management

#[cfg(test)]
mod cleanup_tests;
