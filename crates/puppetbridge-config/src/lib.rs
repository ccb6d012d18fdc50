// crates/puppetbridge-config/src/lib.rs
// ============================================================================
// Module: Puppetbridge Config Library
// Description: Canonical config model, schema migration, and validation.
// Purpose: Single source of truth for the bridge configuration lifecycle.
// Dependencies: puppetbridge-core, serde, serde_yaml
// ============================================================================

//! ## Overview
//! `puppetbridge-config` governs the configuration lifecycle for the bridge:
//! it migrates a persisted configuration document from an older schema to the
//! current one, refuses startup while security-sensitive fields are left at
//! example values, resolves per-user and per-homeserver access levels, and
//! derives the identity-namespace descriptor the appservice registers with
//! its homeserver.
//!
//! Security posture: config inputs are untrusted; validation fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod defaults;
pub mod document;
pub mod migrate;
pub mod namespace;
pub mod permissions;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::BridgeConfig;
pub use config::ConfigError;
pub use defaults::default_config_yaml;
pub use defaults::default_document;
pub use document::ConfigDocument;
pub use migrate::FieldMigration;
pub use migrate::MigrationReport;
pub use migrate::MigrationWarning;
pub use migrate::migrate;
pub use migrate::migration_plan;
pub use namespace::NamespaceDescriptor;
pub use namespace::UserNamespaces;
pub use namespace::user_namespaces;
pub use permissions::PermissionGrant;
pub use permissions::resolve_permissions;
pub use validate::ForbiddenDefault;
pub use validate::ForbiddenValue;
pub use validate::Violation;
pub use validate::check_forbidden_defaults;
pub use validate::ensure_no_forbidden_defaults;
pub use validate::forbidden_defaults;
