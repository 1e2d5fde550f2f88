//! VFS configuration.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the standard layout.

use serde::{Deserialize, Serialize};

use crate::constants::{DATABASE_NAME, DEFAULT_DRIVE, NODE_STORE_NAME, PARENT_INDEX_NAME};
use crate::core::VfsError;

/// Settings for opening and bootstrapping a VFS.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VfsConfig {
    /// IndexedDB database name
    pub database_name: String,

    /// Object store holding the nodes
    pub store_name: String,

    /// Name of the parent-path index
    pub parent_index: String,

    /// Drive used for paths without a drive prefix, and bootstrapped on open
    pub default_drive: char,

    /// Create `System\Desktop` and the explorer shortcut on open
    pub bootstrap_desktop: bool,
}

impl Default for VfsConfig {
    fn default() -> Self {
        Self {
            database_name: String::from(DATABASE_NAME),
            store_name: String::from(NODE_STORE_NAME),
            parent_index: String::from(PARENT_INDEX_NAME),
            default_drive: DEFAULT_DRIVE,
            bootstrap_desktop: true,
        }
    }
}

impl VfsConfig {
    /// Parse a JSON config, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, VfsError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| VfsError::invalid_argument(format!("config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values that cannot be caught by deserialization.
    pub fn validate(&self) -> Result<(), VfsError> {
        if !self.default_drive.is_ascii_alphabetic() {
            return Err(VfsError::invalid_argument(format!(
                "default drive '{}' is not a letter",
                self.default_drive
            )));
        }
        if self.database_name.is_empty() || self.store_name.is_empty() || self.parent_index.is_empty()
        {
            return Err(VfsError::invalid_argument("storage names cannot be empty"));
        }
        Ok(())
    }

    /// The configured drive letter, upper-cased.
    pub fn drive(&self) -> char {
        self.default_drive.to_ascii_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VfsConfig::default();
        assert_eq!(config.database_name, "pseudo-os-fs-v5-windows");
        assert_eq!(config.store_name, "nodes");
        assert_eq!(config.parent_index, "by-parent");
        assert_eq!(config.drive(), 'C');
        assert!(config.bootstrap_desktop);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = VfsConfig::from_json(r#"{"default_drive": "d", "bootstrap_desktop": false}"#)
            .unwrap();
        assert_eq!(config.drive(), 'D');
        assert!(!config.bootstrap_desktop);
        assert_eq!(config.store_name, "nodes");

        let config = VfsConfig::from_json("{}").unwrap();
        assert_eq!(config, VfsConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(VfsConfig::from_json(r#"{"default_drive": "1"}"#).is_err());
        assert!(VfsConfig::from_json(r#"{"store_name": ""}"#).is_err());
        assert!(VfsConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_invalid_config_kind() {
        let err = VfsConfig::from_json("{").unwrap_err();
        assert_eq!(err.kind(), "InvalidArgument");

        let err = VfsConfig::from_json(r#"{"default_drive": "1"}"#).unwrap_err();
        assert!(matches!(err, VfsError::InvalidArgument(_)));
    }
}
