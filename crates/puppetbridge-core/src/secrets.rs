// crates/puppetbridge-core/src/secrets.rs
// ============================================================================
// Module: Secret Token Generation
// Description: Cryptographically random secret tokens for bridge config.
// Purpose: Replace `generate` sentinels with fresh secrets during migration.
// Dependencies: rand
// ============================================================================

//! ## Overview
//! Secret tokens protect the appservice transport and the bridge's public
//! endpoints. A configuration ships with the literal sentinel `generate` in
//! place of each secret; the migration engine swaps the sentinel for a token
//! drawn from OS randomness. Generation is non-blocking and infallible.

// ============================================================================
// SECTION: Imports
// ============================================================================

use rand::RngCore;
use rand::rngs::OsRng;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Sentinel value marking a secret field for regeneration.
pub const GENERATE_SENTINEL: &str = "generate";
/// Number of random bytes backing a generated token.
const TOKEN_BYTES: usize = 32;
/// Length in characters of a generated token (hex-encoded bytes).
pub const TOKEN_LENGTH: usize = TOKEN_BYTES * 2;

// ============================================================================
// SECTION: Token Source
// ============================================================================

/// Source of cryptographically random secret tokens.
pub trait TokenSource {
    /// Returns a newly generated secret token.
    fn generate_token(&self) -> String;
}

/// Token source backed by the operating system RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsTokenSource;

impl TokenSource for OsTokenSource {
    fn generate_token(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        bytes.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
