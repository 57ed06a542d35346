//! Tests for the cookie cache
