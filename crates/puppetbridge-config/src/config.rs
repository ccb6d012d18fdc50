// crates/puppetbridge-config/src/config.rs
// ============================================================================
// Module: Bridge Configuration
// Description: Configuration loading, migration, and validation lifecycle.
// Purpose: Provide strict, fail-closed construction of the runtime config.
// Dependencies: puppetbridge-core, serde_yaml
// ============================================================================

//! ## Overview
//! [`BridgeConfig`] is the explicitly owned configuration object the rest of
//! the bridge reads. It is constructed exactly once per process, after the
//! persisted document has been migrated onto the current schema and the
//! forbidden-default gate has passed. There is no ambient global; callers
//! pass the config by reference. Loading fails closed: size limits, UTF-8,
//! and validation errors all refuse startup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use puppetbridge_core::MalformedUserId;
use puppetbridge_core::OsTokenSource;
use puppetbridge_core::TokenSource;
use puppetbridge_core::UserId;
use thiserror::Error;

use crate::defaults::default_document;
use crate::document::ConfigDocument;
use crate::migrate::MigrationReport;
use crate::migrate::migrate;
use crate::migrate::migration_plan;
use crate::namespace::UserNamespaces;
use crate::namespace::user_namespaces;
use crate::permissions::PermissionGrant;
use crate::permissions::resolve_permissions;
use crate::validate::Violation;
use crate::validate::ensure_no_forbidden_defaults;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "config.yaml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "PUPPETBRIDGE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Config Type
// ============================================================================

/// The migrated, validated bridge configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// The schema-normalized configuration document.
    document: ConfigDocument,
}

impl BridgeConfig {
    /// Loads, migrates, and validates configuration from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<(Self, MigrationReport), ConfigError> {
        let resolved = resolve_path(path)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let old = ConfigDocument::from_yaml_str(content)?;
        Self::upgrade(&old, &OsTokenSource)
    }

    /// Migrates an old document onto the current schema and validates it.
    ///
    /// The returned report carries any fields that degraded to schema
    /// defaults; an empty report means a clean migration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when forbidden defaults remain,
    /// or [`ConfigError::Parse`] when the embedded defaults are broken.
    pub fn upgrade(
        old: &ConfigDocument,
        tokens: &dyn TokenSource,
    ) -> Result<(Self, MigrationReport), ConfigError> {
        let mut document = default_document()?;
        let report = migrate(old, &mut document, &migration_plan(), tokens);
        ensure_no_forbidden_defaults(&document)?;
        Ok((
            Self {
                document,
            },
            report,
        ))
    }

    /// Returns the underlying schema-normalized document.
    #[must_use]
    pub const fn document(&self) -> &ConfigDocument {
        &self.document
    }

    /// Resolves the access level for a user.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedUserId`] when the identifier has no homeserver
    /// separator; the failure is scoped to this resolution call.
    pub fn permissions(&self, user_id: &UserId) -> Result<PermissionGrant, MalformedUserId> {
        resolve_permissions(&self.document, user_id)
    }

    /// Derives the registration namespace list from current config state.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when template or domain fields are
    /// missing or malformed.
    pub fn user_namespaces(&self) -> Result<UserNamespaces, ConfigError> {
        user_namespaces(&self.document)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised by the configuration lifecycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// YAML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Forbidden default values left in the document.
    #[error("config validation failed: {}", format_violations(.0))]
    Validation(Vec<Violation>),
}

/// Joins violations into one user-facing message.
fn format_violations(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
