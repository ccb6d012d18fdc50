// crates/puppetbridge-config/src/permissions.rs
// ============================================================================
// Module: Permission Resolution
// Description: Tiered access-level lookup for bridge users.
// Purpose: Resolve user and admin access from `bridge.permissions`.
// Dependencies: puppetbridge-core, serde_yaml
// ============================================================================

//! ## Overview
//! Access levels live in the `bridge.permissions` mapping of the migrated
//! document. Resolution is a first-match-wins chain over three tiers: the
//! exact user identifier, the user's homeserver domain, then the wildcard
//! `*`. Tiers never merge; the first tier with an entry decides. Level
//! comparison is exact and case-sensitive.
//!
//! Resolution is a pure read over the document and is safe for concurrent
//! callers as long as the document itself is not mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use puppetbridge_core::MalformedUserId;
use puppetbridge_core::UserId;
use serde_yaml::Value;

use crate::document::ConfigDocument;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Key path of the permissions mapping.
pub const PERMISSIONS_PATH: &str = "bridge.permissions";
/// Wildcard key matching every user.
pub const WILDCARD_KEY: &str = "*";
/// Level string granting user access.
const LEVEL_USER: &str = "user";
/// Level string granting user and admin access.
const LEVEL_ADMIN: &str = "admin";

// ============================================================================
// SECTION: Grant Model
// ============================================================================

/// Resolved access for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrant {
    /// Whether the user may use the bridge.
    pub user: bool,
    /// Whether the user may administer the bridge.
    pub admin: bool,
    /// The raw configured level string, empty when nothing matched.
    pub level: String,
}

impl PermissionGrant {
    /// Builds a grant from a raw level string.
    ///
    /// `admin` implies user access; `user` grants user access only; any
    /// other text (including the empty string) grants neither.
    #[must_use]
    pub fn from_level(level: &str) -> Self {
        let admin = level == LEVEL_ADMIN;
        Self {
            user: admin || level == LEVEL_USER,
            admin,
            level: level.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves the access level for a user identifier.
///
/// Tiers in order: exact identifier, homeserver domain, wildcard `*`. The
/// wildcard being absent resolves to the empty level.
///
/// # Errors
///
/// Returns [`MalformedUserId`] when the identifier has no `:` separator and
/// the exact tier did not match, since the domain tier cannot be evaluated.
pub fn resolve_permissions(
    document: &ConfigDocument,
    user_id: &UserId,
) -> Result<PermissionGrant, MalformedUserId> {
    let permissions = document.get_mapping(PERMISSIONS_PATH);
    let lookup = |key: &str| {
        permissions
            .and_then(|mapping| mapping.get(key))
            .and_then(Value::as_str)
    };
    if let Some(level) = lookup(user_id.as_str()) {
        return Ok(PermissionGrant::from_level(level));
    }
    let homeserver = user_id.homeserver()?;
    if let Some(level) = lookup(homeserver) {
        return Ok(PermissionGrant::from_level(level));
    }
    Ok(PermissionGrant::from_level(lookup(WILDCARD_KEY).unwrap_or("")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test fixtures use explicit asserts and unwraps for clarity."
    )]

    use super::*;

    /// Builds a document with the given permissions block.
    fn doc(permissions_yaml: &str) -> ConfigDocument {
        let text = format!("bridge:\n    permissions:\n{permissions_yaml}");
        ConfigDocument::from_yaml_str(&text).unwrap()
    }

    #[test]
    fn exact_match_wins_over_domain_and_wildcard() {
        let document = doc(
            "        '@bob:example.org': user\n        example.org: admin\n        '*': admin\n",
        );
        let grant = resolve_permissions(&document, &UserId::new("@bob:example.org")).unwrap();
        assert_eq!(grant, PermissionGrant::from_level("user"));
        assert!(grant.user);
        assert!(!grant.admin);
    }

    #[test]
    fn domain_tier_grants_admin() {
        let document = doc("        example.org: admin\n");
        let grant = resolve_permissions(&document, &UserId::new("@bob:example.org")).unwrap();
        assert!(grant.user, "admin implies user access");
        assert!(grant.admin);
        assert_eq!(grant.level, "admin");
    }

    #[test]
    fn wildcard_tier_grants_user_only() {
        let document = doc("        '*': user\n");
        let grant = resolve_permissions(&document, &UserId::new("@eve:other.org")).unwrap();
        assert!(grant.user);
        assert!(!grant.admin);
        assert_eq!(grant.level, "user");
    }

    #[test]
    fn missing_wildcard_resolves_to_empty_level() {
        let document = doc("        example.org: admin\n");
        let grant = resolve_permissions(&document, &UserId::new("@eve:other.org")).unwrap();
        assert_eq!(grant, PermissionGrant::from_level(""));
        assert!(!grant.user);
        assert!(!grant.admin);
    }

    #[test]
    fn absent_permissions_mapping_grants_nothing() {
        let document = ConfigDocument::default();
        let grant = resolve_permissions(&document, &UserId::new("@bob:example.org")).unwrap();
        assert_eq!(grant.level, "");
    }

    #[test]
    fn domain_tier_uses_substring_after_first_colon() {
        let document = doc("        'y:z': user\n");
        let grant = resolve_permissions(&document, &UserId::new("@x:y:z")).unwrap();
        assert_eq!(grant.level, "user", "domain of @x:y:z is y:z, never re-split");
    }

    #[test]
    fn unrecognized_level_grants_nothing() {
        let document = doc("        example.org: Admin\n");
        let grant = resolve_permissions(&document, &UserId::new("@bob:example.org")).unwrap();
        assert!(!grant.user, "level comparison is case-sensitive");
        assert!(!grant.admin);
        assert_eq!(grant.level, "Admin");
    }

    #[test]
    fn separatorless_identifier_fails_at_domain_tier() {
        let document = doc("        '*': user\n");
        let err = resolve_permissions(&document, &UserId::new("bob")).unwrap_err();
        assert_eq!(err.user_id, "bob");
    }

    #[test]
    fn separatorless_identifier_with_exact_entry_resolves() {
        let document = doc("        bob: admin\n");
        let grant = resolve_permissions(&document, &UserId::new("bob")).unwrap();
        assert!(grant.admin, "the exact tier runs before domain extraction");
    }

    #[test]
    fn non_string_level_is_ignored() {
        let document = doc("        example.org: 3\n        '*': user\n");
        let grant = resolve_permissions(&document, &UserId::new("@bob:example.org")).unwrap();
        assert_eq!(grant.level, "user", "non-string entries fall through to later tiers");
    }
}
