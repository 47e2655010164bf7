//! Session configuration

use super::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a [`Session`](super::Session) runs scripts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Id of the stem strain
    pub stem: String,
    /// Abort a script at the first failing command
    pub stop_on_error: bool,
    /// Write each command before its output
    pub echo: bool,
    /// Indent `dump` output
    pub pretty_json: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            stem: "stem".to_string(),
            stop_on_error: true,
            echo: false,
            pretty_json: true,
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        info!("Loaded session config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.stem, "stem");
        assert!(config.stop_on_error);
        assert!(!config.echo);
        assert!(config.pretty_json);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: SessionConfig = serde_json::from_str(r#"{"stem": "wuhan", "echo": true}"#).unwrap();
        assert_eq!(config.stem, "wuhan");
        assert!(config.echo);
        assert!(config.stop_on_error);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "genealogy-config-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"stop_on_error": false}"#).unwrap();
        let config = SessionConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(!config.stop_on_error);
        assert_eq!(config.stem, "stem");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = SessionConfig::load("/nonexistent/genealogy.json").unwrap_err();
        assert!(matches!(err, crate::session::SessionError::Io(_)));
    }
}
