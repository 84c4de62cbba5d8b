//! Queue configuration.
//!
//! The only tunables this layer owns are the queue capacities. Defaults
//! suit a single-process deployment; integrators can override them from
//! TOML:
//!
//! ```toml
//! [queues]
//! action_capacity = 4096
//! command_capacity = 4096
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capacities for the action and command queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Bound of the action queue (client → server).
    pub action_capacity: usize,
    /// Bound of the command queue (server → client).
    pub command_capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            action_capacity: 1024,
            command_capacity: 1024,
        }
    }
}

/// Errors loading a queue configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse queue configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A zero-capacity channel cannot exist.
    #[error("queue capacity must be non-zero: {field}")]
    InvalidCapacity { field: &'static str },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    queues: QueueConfig,
}

impl QueueConfig {
    /// Parse from a TOML document. Missing fields fall back to defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(raw)?;
        file.queues.validate()?;
        Ok(file.queues)
    }

    /// Load from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Reject capacities the queues cannot be built with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.action_capacity == 0 {
            return Err(ConfigError::InvalidCapacity {
                field: "action_capacity",
            });
        }
        if self.command_capacity == 0 {
            return Err(ConfigError::InvalidCapacity {
                field: "command_capacity",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = QueueConfig::default();
        config.validate().unwrap();
        assert_eq!(config.action_capacity, 1024);
        assert_eq!(config.command_capacity, 1024);
    }

    #[test]
    fn parses_a_full_document() {
        let config = QueueConfig::from_toml_str(
            r#"
            [queues]
            action_capacity = 64
            command_capacity = 32
            "#,
        )
        .unwrap();

        assert_eq!(config.action_capacity, 64);
        assert_eq!(config.command_capacity, 32);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = QueueConfig::from_toml_str(
            r#"
            [queues]
            action_capacity = 64
            "#,
        )
        .unwrap();

        assert_eq!(config.action_capacity, 64);
        assert_eq!(config.command_capacity, 1024);

        let empty = QueueConfig::from_toml_str("").unwrap();
        assert_eq!(empty, QueueConfig::default());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = QueueConfig::from_toml_str(
            r#"
            [queues]
            command_capacity = 0
            "#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidCapacity {
                field: "command_capacity"
            }
        ));
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[queues]\naction_capacity = 16").unwrap();

        let config = QueueConfig::from_file(file.path()).unwrap();
        assert_eq!(config.action_capacity, 16);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = QueueConfig::from_file("/nonexistent/queues.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
