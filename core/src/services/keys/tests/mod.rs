//! Tests for the key ring and rotation service
