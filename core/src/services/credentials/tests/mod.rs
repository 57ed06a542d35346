//! Tests for credential verification

#[cfg(test)]
mod verifier_tests;
