//! Tool configuration.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{CliError, CliResult};

/// Tool configuration, loaded from a JSON file and overridden by flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Print the code table after the summary
    #[serde(default)]
    pub verbose: bool,

    /// Reject inputs larger than this many bytes
    #[serde(default)]
    pub max_input_bytes: Option<u64>,

    /// Print the report as JSON
    #[serde(default)]
    pub json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            verbose: false,
            max_input_bytes: None,
            json: false,
        }
    }
}

impl CliConfig {
    /// Load a configuration file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check an input size against `max_input_bytes`.
    pub fn check_input_size(&self, size: u64) -> CliResult<()> {
        match self.max_input_bytes {
            Some(limit) if size > limit => Err(CliError::InputTooLarge { size, limit }),
            _ => Ok(()),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_object() {
        let config: CliConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level, "warn");
        assert!(config.max_input_bytes.is_none());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"log_level": "debug", "verbose": true, "max_input_bytes": 4096}}"#
        )
        .unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.verbose);
        assert!(!config.json);
        assert_eq!(config.max_input_bytes, Some(4096));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"level": "debug"}}"#).unwrap();

        let err = CliConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = CliConfig::from_file(Path::new("/nonexistent/haagenti.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn test_check_input_size() {
        let config = CliConfig {
            max_input_bytes: Some(10),
            ..CliConfig::default()
        };
        assert!(config.check_input_size(10).is_ok());
        assert!(matches!(
            config.check_input_size(11),
            Err(CliError::InputTooLarge { size: 11, limit: 10 })
        ));
        assert!(CliConfig::default().check_input_size(u64::MAX).is_ok());
    }
}
