//! Binding model configuration.
//!
//! Loaded from JSON; every field is optional and falls back to its default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Log a warning for unsupported widgets and stale property tags.
    pub show_warnings: bool,
    /// Link discovered widgets to properties named after their attribute.
    pub auto_link_properties: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            show_warnings: true,
            auto_link_properties: false,
        }
    }
}

impl ModelConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse model config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::info!("Loaded model config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = ModelConfig::from_json_str(r#"{"auto_link_properties": true}"#).unwrap();
        assert!(config.show_warnings);
        assert!(config.auto_link_properties);
        assert_eq!(ModelConfig::from_json_str("{}").unwrap(), ModelConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"show_warnings": false}}"#).unwrap();
        let config = ModelConfig::load(file.path()).unwrap();
        assert!(!config.show_warnings);
        assert!(!config.auto_link_properties);
    }

    #[test]
    fn test_load_reports_path() {
        let err = ModelConfig::load(Path::new("/nonexistent/propbind.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/propbind.json"));
    }
}
