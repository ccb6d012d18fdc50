// crates/puppetbridge-config/src/migrate.rs
// ============================================================================
// Module: Schema Migration Engine
// Description: Ordered field migration from an old config document to the
//              current schema.
// Purpose: Normalize persisted configuration onto the new-schema defaults.
// Dependencies: puppetbridge-core, serde_yaml
// ============================================================================

//! ## Overview
//! Migration walks an ordered list of [`FieldMigration`] entries, copying or
//! computing each field from the old document into a new document seeded with
//! the schema defaults. The declared order is preserved exactly; entries run
//! strictly in sequence so a future entry may depend on an earlier one.
//!
//! A field with the wrong YAML kind in the old document is left at its
//! schema default and recorded as a [`MigrationWarning`]; migration itself
//! never fails. Secret fields holding the `generate` sentinel are replaced
//! through the [`TokenSource`], at most once per field per run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use puppetbridge_core::GENERATE_SENTINEL;
use puppetbridge_core::TokenSource;
use serde_yaml::Value;

use crate::document::ConfigDocument;

// ============================================================================
// SECTION: Migration Model
// ============================================================================

/// A single ordered entry of the migration plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMigration {
    /// Copy the old value verbatim when present and well-typed.
    Copy {
        /// Dot-separated key path of the field.
        path: &'static str,
    },
    /// Merge the old mapping over the new-schema default mapping.
    ///
    /// Keys present only in the default survive; old keys overwrite.
    CopyDict {
        /// Dot-separated key path of the mapping.
        path: &'static str,
    },
    /// Secret field regenerated when its effective value is the
    /// `generate` sentinel, otherwise copied like [`FieldMigration::Copy`].
    GeneratedSecret {
        /// Dot-separated key path of the secret.
        path: &'static str,
    },
}

impl FieldMigration {
    /// Returns the key path this entry migrates.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Copy {
                path,
            }
            | Self::CopyDict {
                path,
            }
            | Self::GeneratedSecret {
                path,
            } => path,
        }
    }
}

/// Warning recorded when an old field is malformed and the schema default
/// is kept instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationWarning {
    /// Key path of the degraded field.
    pub path: String,
    /// YAML kind the schema expects at the path.
    pub expected: &'static str,
    /// YAML kind found in the old document.
    pub found: &'static str,
}

impl fmt::Display for MigrationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, found {}; keeping schema default",
            self.path, self.expected, self.found
        )
    }
}

/// Outcome of a migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Fields degraded to their schema default during the run.
    pub warnings: Vec<MigrationWarning>,
}

impl MigrationReport {
    /// Returns true when no field was degraded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

// ============================================================================
// SECTION: Migration Plan
// ============================================================================

/// Returns the declared, ordered migration plan for the current schema.
#[must_use]
pub fn migration_plan() -> Vec<FieldMigration> {
    vec![
        FieldMigration::Copy {
            path: "homeserver.address",
        },
        FieldMigration::Copy {
            path: "homeserver.domain",
        },
        FieldMigration::Copy {
            path: "homeserver.verify_ssl",
        },
        FieldMigration::Copy {
            path: "appservice.address",
        },
        FieldMigration::Copy {
            path: "appservice.hostname",
        },
        FieldMigration::Copy {
            path: "appservice.port",
        },
        FieldMigration::Copy {
            path: "appservice.id",
        },
        FieldMigration::Copy {
            path: "appservice.bot_username",
        },
        FieldMigration::Copy {
            path: "appservice.bot_displayname",
        },
        FieldMigration::Copy {
            path: "appservice.bot_avatar",
        },
        FieldMigration::GeneratedSecret {
            path: "appservice.as_token",
        },
        FieldMigration::GeneratedSecret {
            path: "appservice.hs_token",
        },
        FieldMigration::Copy {
            path: "appservice.community_id",
        },
        FieldMigration::Copy {
            path: "appservice.public.enabled",
        },
        FieldMigration::Copy {
            path: "appservice.public.prefix",
        },
        FieldMigration::Copy {
            path: "appservice.public.external",
        },
        FieldMigration::GeneratedSecret {
            path: "appservice.public.shared_secret",
        },
        FieldMigration::Copy {
            path: "bridge.username_template",
        },
        FieldMigration::Copy {
            path: "bridge.displayname_template",
        },
        FieldMigration::Copy {
            path: "bridge.displayname_preference",
        },
        FieldMigration::Copy {
            path: "bridge.community_template",
        },
        FieldMigration::Copy {
            path: "bridge.command_prefix",
        },
        FieldMigration::Copy {
            path: "bridge.initial_chat_sync",
        },
        FieldMigration::Copy {
            path: "bridge.invite_own_puppet_to_pm",
        },
        FieldMigration::Copy {
            path: "bridge.sync_with_custom_puppets",
        },
        FieldMigration::Copy {
            path: "bridge.login_shared_secret",
        },
        FieldMigration::Copy {
            path: "bridge.presence",
        },
        FieldMigration::Copy {
            path: "bridge.update_avatar_initial_sync",
        },
        FieldMigration::Copy {
            path: "bridge.encryption.allow",
        },
        FieldMigration::Copy {
            path: "bridge.encryption.default",
        },
        FieldMigration::Copy {
            path: "bridge.delivery_receipts",
        },
        FieldMigration::Copy {
            path: "bridge.allow_invites",
        },
        FieldMigration::CopyDict {
            path: "bridge.permissions",
        },
    ]
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Applies the migration plan in declared order, mutating `new` in place.
///
/// `new` is expected to hold the schema defaults; `old` is the persisted
/// document being upgraded. Malformed old fields degrade to the defaults
/// and are recorded in the returned report.
pub fn migrate(
    old: &ConfigDocument,
    new: &mut ConfigDocument,
    plan: &[FieldMigration],
    tokens: &dyn TokenSource,
) -> MigrationReport {
    let mut report = MigrationReport::default();
    for entry in plan {
        match entry {
            FieldMigration::Copy {
                path,
            } => apply_copy(old, new, path, &mut report),
            FieldMigration::CopyDict {
                path,
            } => apply_copy_dict(old, new, path, &mut report),
            FieldMigration::GeneratedSecret {
                path,
            } => apply_secret(old, new, path, tokens, &mut report),
        }
    }
    report
}

/// Copies one field from the old document when present and well-typed.
///
/// An absent or explicitly-null old value leaves the schema default in
/// place. A value whose YAML kind differs from a non-null default is
/// degraded to the default with a warning.
fn apply_copy(
    old: &ConfigDocument,
    new: &mut ConfigDocument,
    path: &str,
    report: &mut MigrationReport,
) {
    let Some(value) = old.get(path) else {
        return;
    };
    if value.is_null() {
        return;
    }
    if let Some(default) = new.get(path)
        && !default.is_null()
        && value_kind(default) != value_kind(value)
    {
        report.warnings.push(MigrationWarning {
            path: path.to_string(),
            expected: value_kind(default),
            found: value_kind(value),
        });
        return;
    }
    new.set(path, value.clone());
}

/// Merges the old mapping at `path` over the new document's default mapping.
fn apply_copy_dict(
    old: &ConfigDocument,
    new: &mut ConfigDocument,
    path: &str,
    report: &mut MigrationReport,
) {
    let Some(value) = old.get(path) else {
        return;
    };
    if value.is_null() {
        return;
    }
    let Some(old_entries) = value.as_mapping() else {
        report.warnings.push(MigrationWarning {
            path: path.to_string(),
            expected: "mapping",
            found: value_kind(value),
        });
        return;
    };
    let mut merged = new.get_mapping(path).cloned().unwrap_or_default();
    for (key, entry) in old_entries {
        merged.insert(key.clone(), entry.clone());
    }
    new.set(path, Value::Mapping(merged));
}

/// Regenerates or copies a secret field.
///
/// The effective current value is the old document's value, falling back to
/// the schema default. The sentinel triggers exactly one token generation;
/// any other value follows the plain copy rules.
fn apply_secret(
    old: &ConfigDocument,
    new: &mut ConfigDocument,
    path: &str,
    tokens: &dyn TokenSource,
    report: &mut MigrationReport,
) {
    let regenerate = old
        .get_str(path)
        .or_else(|| new.get_str(path))
        .is_some_and(|value| value == GENERATE_SENTINEL);
    if regenerate {
        new.set(path, Value::String(tokens.generate_token()));
    } else {
        apply_copy(old, new, path, report);
    }
}

/// Returns a stable label for a YAML value kind.
const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
