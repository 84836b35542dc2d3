//! Embedder-facing configuration.
//!
//! The defaults reproduce stock behavior; embedders mostly reach for this to
//! extend the recognized ABI sub-namespace spellings or to turn comment
//! capture off wholesale.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::errors::Result;

/// Configuration for one classification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Fetch one-line comments through the documentation collaborator.
    pub capture_comments: bool,
    /// ABI-version sub-namespaces tolerated between `std::` and the
    /// unqualified container name.
    pub std_sub_namespaces: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            capture_comments: true,
            std_sub_namespaces: vec!["__1".to_string(), "__cxx11".to_string()],
        }
    }
}

impl ClassifierConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClassifierConfig::default();
        assert!(config.capture_comments);
        assert_eq!(config.std_sub_namespaces, vec!["__1", "__cxx11"]);
    }

    #[test]
    fn test_from_toml() {
        let config = ClassifierConfig::from_toml_str(
            r#"
            capture_comments = false
            std_sub_namespaces = ["__1"]
            "#,
        )
        .unwrap();
        assert!(!config.capture_comments);
        assert_eq!(config.std_sub_namespaces, vec!["__1"]);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ClassifierConfig::from_toml_str("unknown_key = 1").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fieldmap.toml");
        std::fs::write(&path, "capture_comments = false\n").unwrap();

        let config = ClassifierConfig::load(&path).unwrap();
        assert!(!config.capture_comments);
        // Unset keys keep their defaults.
        assert_eq!(config.std_sub_namespaces, vec!["__1", "__cxx11"]);
    }
}
