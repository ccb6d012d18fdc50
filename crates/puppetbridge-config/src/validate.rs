// crates/puppetbridge-config/src/validate.rs
// ============================================================================
// Module: Forbidden-Default Validation
// Description: Detection of security-sensitive fields left at example values.
// Purpose: Block startup until placeholder configuration is replaced.
// Dependencies: puppetbridge-core, serde_yaml
// ============================================================================

//! ## Overview
//! The default configuration ships with example values (`example.com`, the
//! public endpoint placeholder) that must be replaced before production use.
//! Each [`ForbiddenDefault`] entry guards one path, optionally gated by a
//! boolean condition path; a missing or false condition skips the entry.
//! Validation enumerates every violation so the operator sees the full list
//! at once, and performs no side effects beyond enumeration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::config::ConfigError;
use crate::document::ConfigDocument;

// ============================================================================
// SECTION: Validation Model
// ============================================================================

/// Unsafe placeholder declaration for a guarded path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForbiddenValue {
    /// The value at the path must not equal this literal.
    Literal(&'static str),
    /// The mapping at the path must not contain this key, regardless of the
    /// key's assigned value.
    Key(&'static str),
}

/// A single forbidden-default rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenDefault {
    /// Guarded key path.
    pub path: &'static str,
    /// Placeholder declaration checked against the document.
    pub value: ForbiddenValue,
    /// Optional condition path; missing or false skips the rule.
    pub condition: Option<&'static str>,
}

/// One detected violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Guarded key path that failed.
    pub path: String,
    /// The offending literal value or forbidden key.
    pub value_or_key: String,
    /// Human-readable reason for the failure.
    pub reason: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

// ============================================================================
// SECTION: Rule Set
// ============================================================================

/// Returns the forbidden-default rules for the current schema.
#[must_use]
pub fn forbidden_defaults() -> Vec<ForbiddenDefault> {
    vec![
        ForbiddenDefault {
            path: "homeserver.address",
            value: ForbiddenValue::Literal("https://example.com"),
            condition: None,
        },
        ForbiddenDefault {
            path: "homeserver.domain",
            value: ForbiddenValue::Literal("example.com"),
            condition: None,
        },
        ForbiddenDefault {
            path: "appservice.public.external",
            value: ForbiddenValue::Literal("https://example.com/public"),
            condition: Some("appservice.public.enabled"),
        },
        ForbiddenDefault {
            path: "bridge.permissions",
            value: ForbiddenValue::Key("example.com"),
            condition: None,
        },
    ]
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Checks the document against the schema's forbidden-default rules.
#[must_use]
pub fn check_forbidden_defaults(document: &ConfigDocument) -> Vec<Violation> {
    check_entries(document, &forbidden_defaults())
}

/// Checks the document against an explicit rule list.
#[must_use]
pub fn check_entries(document: &ConfigDocument, entries: &[ForbiddenDefault]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for entry in entries {
        if let Some(condition) = entry.condition
            && !document.get_bool(condition).unwrap_or(false)
        {
            continue;
        }
        match entry.value {
            ForbiddenValue::Literal(literal) => {
                if document.get_str(entry.path) == Some(literal) {
                    violations.push(Violation {
                        path: entry.path.to_string(),
                        value_or_key: literal.to_string(),
                        reason: format!("is still set to the example value `{literal}`"),
                    });
                }
            }
            ForbiddenValue::Key(key) => {
                let present = document
                    .get_mapping(entry.path)
                    .is_some_and(|mapping| mapping.get(key).is_some());
                if present {
                    violations.push(Violation {
                        path: entry.path.to_string(),
                        value_or_key: key.to_string(),
                        reason: format!("must not contain the example key `{key}`"),
                    });
                }
            }
        }
    }
    violations
}

/// Fails when any forbidden default remains in the document.
///
/// # Errors
///
/// Returns [`ConfigError::Validation`] enumerating every violation.
pub fn ensure_no_forbidden_defaults(document: &ConfigDocument) -> Result<(), ConfigError> {
    let violations = check_forbidden_defaults(document);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(violations))
    }
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

    /// Parses a document fixture.
    fn doc(text: &str) -> ConfigDocument {
        ConfigDocument::from_yaml_str(text).unwrap()
    }

    #[test]
    fn literal_match_is_flagged() {
        let document = doc("homeserver:\n    domain: example.com\n");
        let violations = check_forbidden_defaults(&document);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "homeserver.domain");
        assert_eq!(violations[0].value_or_key, "example.com");
    }

    #[test]
    fn replaced_literal_passes() {
        let document = doc("homeserver:\n    domain: bridge.example\n");
        assert!(check_forbidden_defaults(&document).is_empty());
    }

    #[test]
    fn disabled_condition_skips_the_rule() {
        let document = doc(
            "appservice:\n    public:\n        enabled: false\n        external: https://example.com/public\n",
        );
        assert!(check_forbidden_defaults(&document).is_empty());
    }

    #[test]
    fn missing_condition_path_skips_the_rule() {
        let document = doc("appservice:\n    public:\n        external: https://example.com/public\n");
        assert!(check_forbidden_defaults(&document).is_empty());
    }

    #[test]
    fn enabled_condition_flags_exactly_one_violation() {
        let document = doc(
            "appservice:\n    public:\n        enabled: true\n        external: https://example.com/public\n",
        );
        let violations = check_forbidden_defaults(&document);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "appservice.public.external");
    }

    #[test]
    fn forbidden_key_is_flagged_regardless_of_value() {
        let document = doc("bridge:\n    permissions:\n        example.com: admin\n");
        let violations = check_forbidden_defaults(&document);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "bridge.permissions");
        assert_eq!(violations[0].value_or_key, "example.com");
    }

    #[test]
    fn permissions_without_the_example_key_pass() {
        let document = doc("bridge:\n    permissions:\n        bridge.example: user\n");
        assert!(check_forbidden_defaults(&document).is_empty());
    }

    #[test]
    fn every_violation_is_enumerated() {
        let document = doc(
            "homeserver:\n    address: https://example.com\n    domain: example.com\nbridge:\n    permissions:\n        example.com: user\n",
        );
        let violations = check_forbidden_defaults(&document);
        assert_eq!(violations.len(), 3, "all offending paths are reported at once");
        let err = ensure_no_forbidden_defaults(&document).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("homeserver.address"));
        assert!(message.contains("homeserver.domain"));
        assert!(message.contains("bridge.permissions"));
    }

    #[test]
    fn clean_document_passes_the_gate() {
        let document = doc("homeserver:\n    domain: bridge.example\n");
        assert!(ensure_no_forbidden_defaults(&document).is_ok());
    }
}
