// crates/puppetbridge-config/src/namespace.rs
// ============================================================================
// Module: Identity Namespace Derivation
// Description: Derivation of the appservice user-namespace descriptor.
// Purpose: Describe the user-ID space this bridge exclusively owns.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The bridge registers an exclusive namespace of user identifiers with its
//! homeserver. The namespace pattern is derived from
//! `bridge.username_template` and `homeserver.domain`: the template is
//! lowercased, the `{userid}` placeholder becomes a wildcard, and the
//! homeserver domain anchors the suffix. Descriptors are recomputed from the
//! document on every call; nothing is cached.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::config::ConfigError;
use crate::document::ConfigDocument;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Placeholder substituted with the wildcard pattern.
pub const USERID_PLACEHOLDER: &str = "{userid}";
/// Wildcard pattern matching any remote user ID.
const USERID_WILDCARD: &str = ".+";

// ============================================================================
// SECTION: Descriptor Model
// ============================================================================

/// One namespace entry of the appservice registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceDescriptor {
    /// Whether this service exclusively owns matching identifiers.
    pub exclusive: bool,
    /// Regular expression matching the owned identifiers.
    pub regex: String,
    /// Optional group to associate bridged users with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// The `users` namespace list of a registration manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserNamespaces {
    /// Namespaces of user identifiers owned by the bridge.
    pub users: Vec<NamespaceDescriptor>,
}

// ============================================================================
// SECTION: Derivation
// ============================================================================

/// Derives the user-namespace descriptor from the current document.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when `bridge.username_template` or
/// `homeserver.domain` is missing, or the template lacks the `{userid}`
/// placeholder.
pub fn user_namespace(document: &ConfigDocument) -> Result<NamespaceDescriptor, ConfigError> {
    let template = document
        .get_str("bridge.username_template")
        .ok_or_else(|| ConfigError::Invalid("bridge.username_template must be set".to_string()))?;
    if !template.contains(USERID_PLACEHOLDER) {
        return Err(ConfigError::Invalid(format!(
            "bridge.username_template must contain {USERID_PLACEHOLDER}"
        )));
    }
    let domain = document
        .get_str("homeserver.domain")
        .ok_or_else(|| ConfigError::Invalid("homeserver.domain must be set".to_string()))?;
    let pattern = template.to_lowercase().replace(USERID_PLACEHOLDER, USERID_WILDCARD);
    let group_id = document
        .get_str("appservice.community_id")
        .filter(|id| !id.is_empty())
        .map(ToOwned::to_owned);
    Ok(NamespaceDescriptor {
        exclusive: true,
        regex: format!("@{pattern}:{domain}"),
        group_id,
    })
}

/// Derives the full `users` namespace list for the registration manifest.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when descriptor derivation fails.
pub fn user_namespaces(document: &ConfigDocument) -> Result<UserNamespaces, ConfigError> {
    Ok(UserNamespaces {
        users: vec![user_namespace(document)?],
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
