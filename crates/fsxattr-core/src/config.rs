//! Configuration module for fsxattr.
//!
//! Provides typed configuration structs that map to the YAML configuration file,
//! with loading, validation, defaults, and a builder for programmatic use.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::buffer::DEFAULT_INITIAL_CAPACITY;

/// Largest value the Linux kernel accepts for a single attribute.
pub const XATTR_SIZE_MAX: usize = 65536;

// ---------------------------------------------------------------------------
// Config struct with sub-sections
// ---------------------------------------------------------------------------

/// Top-level configuration for fsxattr.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub buffer: BufferConfig,
    pub logging: LoggingConfig,
}

/// Attribute buffer sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Bytes allocated before the first read. `0` probes for the size first.
    pub initial_capacity: usize,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config::load()
// ---------------------------------------------------------------------------

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` and reject the result if [`Config::validate`] finds
    /// any errors. The error message lists all of them.
    pub fn load_validated(path: &Path) -> anyhow::Result<Self> {
        let config = Self::load(path)?;
        let errors = config.validate();
        if !errors.is_empty() {
            let list: Vec<String> = errors.iter().map(ToString::to_string).collect();
            anyhow::bail!("invalid configuration: {}", list.join("; "));
        }
        Ok(config)
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/fsxattr/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("fsxattr")
            .join("config.yaml")
    }
}

// ---------------------------------------------------------------------------
// Config::validate()
// ---------------------------------------------------------------------------

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path to the offending field, e.g. `"buffer.initial_capacity"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Valid values for `logging.level`.
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.buffer.initial_capacity > XATTR_SIZE_MAX {
            errors.push(ValidationError {
                field: "buffer.initial_capacity".into(),
                message: format!(
                    "must not exceed {XATTR_SIZE_MAX} bytes (got {})",
                    self.buffer.initial_capacity
                ),
            });
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError {
                field: "logging.level".into(),
                message: format!(
                    "invalid level '{}'; valid options: {}",
                    self.logging.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// ConfigBuilder
// ---------------------------------------------------------------------------

/// Builder for constructing a [`Config`] programmatically.
///
/// Starts from [`Config::default`] and allows selective overrides.
///
/// # Example
///
/// ```rust
/// use fsxattr_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .buffer_initial_capacity(4096)
///     .logging_level("debug")
///     .build();
/// assert_eq!(config.buffer.initial_capacity, 4096);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer_initial_capacity(mut self, bytes: usize) -> Self {
        self.config.buffer.initial_capacity = bytes;
        self
    }

    pub fn logging_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.level = level.into();
        self
    }

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.buffer.initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_load_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "buffer:\n  initial_capacity: 0").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.buffer.initial_capacity, 0);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_load_validated() {
        assert!(Config::load_validated(Path::new("/nonexistent/fsxattr.yaml")).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  level: loud").unwrap();
        let err = Config::load_validated(file.path()).unwrap_err();
        assert!(err.to_string().contains("logging.level"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  level: info").unwrap();
        let config = Config::load_validated(file.path()).unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_malformed_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "buffer: [unclosed").unwrap();
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_validate_reports_all_errors() {
        let errors = ConfigBuilder::new()
            .buffer_initial_capacity(XATTR_SIZE_MAX + 1)
            .logging_level("loud")
            .build_validated()
            .unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["buffer.initial_capacity", "logging.level"]);
        assert!(errors[1].to_string().starts_with("logging.level: invalid level 'loud'"));
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.ends_with("fsxattr/config.yaml"));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ConfigBuilder::new().logging_level("debug").build();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
