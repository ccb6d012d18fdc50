// crates/puppetbridge-config/src/document.rs
// ============================================================================
// Module: Configuration Document
// Description: Dot-path access over a YAML configuration mapping.
// Purpose: Provide the key-path document the migration and validators read.
// Dependencies: serde, serde_yaml
// ============================================================================

//! ## Overview
//! A [`ConfigDocument`] is a YAML mapping addressed by dot-separated key
//! paths such as `appservice.public.shared_secret`. Reads of absent keys are
//! a normal `None` branch, never an error; writes create intermediate
//! mappings as needed. The document root is a mapping by construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_yaml::Mapping;
use serde_yaml::Value;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Document Type
// ============================================================================

/// Nested key-path configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    /// Root mapping of the document.
    root: Mapping,
}

impl ConfigDocument {
    /// Parses a document from YAML text.
    ///
    /// An empty or null document is treated as an empty mapping so that a
    /// freshly created config file migrates onto pure schema defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid YAML or the
    /// root is neither a mapping nor null.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_yaml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(root) => Ok(Self {
                root,
            }),
            _ => Err(ConfigError::Parse("config document root must be a mapping".to_string())),
        }
    }

    /// Serializes the document back to YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when serialization fails.
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(&self.root).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Returns the value at a dot-separated key path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns the string value at a key path, if present and a string.
    #[must_use]
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    /// Returns the boolean value at a key path, if present and a boolean.
    #[must_use]
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Returns the mapping at a key path, if present and a mapping.
    #[must_use]
    pub fn get_mapping(&self, path: &str) -> Option<&Mapping> {
        self.get(path).and_then(Value::as_mapping)
    }

    /// Writes a value at a dot-separated key path.
    ///
    /// Intermediate mappings are created as needed; a non-mapping value in
    /// the middle of the path is replaced by a mapping.
    pub fn set(&mut self, path: &str, value: Value) {
        let (parents, leaf) = match path.rsplit_once('.') {
            Some((head, tail)) => (head, tail),
            None => ("", path),
        };
        let mut current = &mut self.root;
        if !parents.is_empty() {
            for segment in parents.split('.') {
                let entry = current
                    .entry(Value::String(segment.to_string()))
                    .or_insert_with(|| Value::Mapping(Mapping::new()));
                if !entry.is_mapping() {
                    *entry = Value::Mapping(Mapping::new());
                }
                match entry {
                    Value::Mapping(next) => current = next,
                    _ => return,
                }
            }
        }
        current.insert(Value::String(leaf.to_string()), value);
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
