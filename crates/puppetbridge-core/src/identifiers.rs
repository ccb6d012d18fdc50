// crates/puppetbridge-core/src/identifiers.rs
// ============================================================================
// Module: Puppetbridge Identifiers
// Description: Canonical opaque identifiers for federated bridge users.
// Purpose: Provide strongly typed, serializable IDs with stable string forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! This module defines the canonical string-based identifiers used throughout
//! Puppetbridge. Identifiers are opaque and serialize as strings. The only
//! structure the bridge relies on is the homeserver separator: a federated
//! user identifier carries its homeserver domain after the first `:`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Federated user identifier in the form `@localpart:homeserver`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new user identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the homeserver portion of the identifier.
    ///
    /// The homeserver is everything after the **first** `:`. For
    /// `@x:y:z` this is `y:z`; later separators are part of the domain.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedUserId`] when the identifier has no `:` separator.
    pub fn homeserver(&self) -> Result<&str, MalformedUserId> {
        match self.0.split_once(':') {
            Some((_, homeserver)) => Ok(homeserver),
            None => Err(MalformedUserId {
                user_id: self.0.clone(),
            }),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Error raised when a user identifier lacks the homeserver separator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed user identifier `{user_id}`: missing `:` separator")]
pub struct MalformedUserId {
    /// The identifier that failed homeserver extraction.
    pub user_id: String,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
