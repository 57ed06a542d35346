//! Tests for the in-memory account repository
