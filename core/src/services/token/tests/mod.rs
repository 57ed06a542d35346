//! Tests for token minting and verification
