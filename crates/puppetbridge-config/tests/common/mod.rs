// crates/puppetbridge-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for configuration lifecycle tests.
// Purpose: Reduce duplication across integration tests for puppetbridge-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use puppetbridge_config::BridgeConfig;
use puppetbridge_config::ConfigDocument;
use puppetbridge_config::MigrationReport;
use puppetbridge_core::OsTokenSource;

/// Parses a YAML string into a `ConfigDocument` for tests.
pub fn document_from_yaml(yaml: &str) -> Result<ConfigDocument, String> {
    ConfigDocument::from_yaml_str(yaml).map_err(|err| err.to_string())
}

/// Returns a configured old document that passes the forbidden-default gate.
pub fn configured_old() -> Result<ConfigDocument, String> {
    document_from_yaml(
        r"
homeserver:
    address: https://matrix.bridge.example
    domain: bridge.example
appservice:
    public:
        shared_secret: generate
bridge:
    username_template: 'facebook_{userid}'
    permissions:
        bridge.example: user
",
    )
}

/// Upgrades an old document with OS-random secrets.
pub fn upgrade(old: &ConfigDocument) -> Result<(BridgeConfig, MigrationReport), String> {
    BridgeConfig::upgrade(old, &OsTokenSource).map_err(|err| err.to_string())
}

/// Reads a required string field from a document.
pub fn expect_str(document: &ConfigDocument, path: &str) -> Result<String, String> {
    document
        .get_str(path)
        .map(ToOwned::to_owned)
        .ok_or_else(|| format!("{path} is not a string"))
}
