//! Tests for the in-memory session repository

#[cfg(test)]
mod memory_tests;
