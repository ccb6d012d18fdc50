//! Permission resolution tests for puppetbridge-config.
// crates/puppetbridge-config/tests/permission_resolution.rs
// =============================================================================
// Module: Permission Resolution Tests
// Description: Tiered fallback resolution over the migrated document.
// Purpose: Ensure exact, domain, and wildcard tiers resolve first-match-wins.
// =============================================================================

use puppetbridge_config::BridgeConfig;
use puppetbridge_config::PermissionGrant;
use puppetbridge_core::UserId;

mod common;

type TestResult = Result<(), String>;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Upgrades a config whose permissions block is the given YAML fragment.
fn config_with_permissions(permissions_yaml: &str) -> Result<BridgeConfig, String> {
    let yaml = format!(
        "homeserver:\n    address: https://matrix.bridge.example\n    domain: bridge.example\nbridge:\n    permissions:\n{permissions_yaml}"
    );
    let old = common::document_from_yaml(&yaml)?;
    let (config, _) = common::upgrade(&old)?;
    Ok(config)
}

/// Resolves a user and compares the grant against expectations.
fn assert_grant(
    config: &BridgeConfig,
    user_id: &str,
    expected: (bool, bool, &str),
) -> TestResult {
    let grant = config
        .permissions(&UserId::new(user_id))
        .map_err(|err| err.to_string())?;
    let (user, admin, level) = expected;
    if grant != PermissionGrant::from_level(level) || grant.user != user || grant.admin != admin {
        return Err(format!("{user_id}: expected {expected:?}, got {grant:?}"));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tier Resolution Tests
// ============================================================================

#[test]
fn exact_entry_wins_over_domain_and_wildcard() -> TestResult {
    let config = config_with_permissions(
        "        '@bob:example.org': user\n        example.org: admin\n        '*': admin\n",
    )?;
    assert_grant(&config, "@bob:example.org", (true, false, "user"))
}

#[test]
fn domain_entry_grants_admin() -> TestResult {
    let config = config_with_permissions("        example.org: admin\n")?;
    assert_grant(&config, "@bob:example.org", (true, true, "admin"))
}

#[test]
fn wildcard_only_grants_user_access() -> TestResult {
    let config = config_with_permissions("        '*': user\n")?;
    assert_grant(&config, "@eve:other.org", (true, false, "user"))
}

#[test]
fn no_matching_tier_grants_nothing() -> TestResult {
    let config = config_with_permissions("        example.org: admin\n")?;
    assert_grant(&config, "@eve:other.org", (false, false, ""))
}

#[test]
fn domain_extraction_stops_at_first_colon() -> TestResult {
    let config = config_with_permissions("        'y:z': user\n")?;
    assert_grant(&config, "@x:y:z", (true, false, "user"))
}

#[test]
fn malformed_identifier_fails_only_that_call() -> TestResult {
    let config = config_with_permissions("        '*': user\n")?;
    if config.permissions(&UserId::new("bob")).is_ok() {
        return Err("an identifier without `:` must fail domain extraction".to_string());
    }
    assert_grant(&config, "@bob:anywhere.example", (true, false, "user"))
}
