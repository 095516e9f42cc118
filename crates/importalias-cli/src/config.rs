//! Configuration file for the `check` command.
//!
//! Rules are compiled in; the file only controls package discovery:
//!
//! ```toml
//! [analyzer]
//! packages = ["./..."]
//! exclude = ["**/generated/**"]
//! goos = "linux"
//! goarch = "amd64"
//! ```

use importalias_go::BuildTarget;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

impl Config {
    /// Loads the configuration a resolver pointed at, or defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(source: &ConfigSource) -> Result<Self, ConfigError> {
        match source.path() {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Package patterns used when none are given on the command line.
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,

    /// Glob patterns pruned from `...` expansion.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Target OS for file name constraints.
    #[serde(default)]
    pub goos: Option<String>,

    /// Target architecture for file name constraints.
    #[serde(default)]
    pub goarch: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            packages: default_packages(),
            exclude: Vec::new(),
            goos: None,
            goarch: None,
        }
    }
}

impl AnalyzerConfig {
    /// Configured target, falling back to `GOOS`/`GOARCH` and then the host.
    #[must_use]
    pub fn build_target(&self) -> BuildTarget {
        let fallback = BuildTarget::from_env();
        BuildTarget::new(
            self.goos.clone().unwrap_or(fallback.goos),
            self.goarch.clone().unwrap_or(fallback.goarch),
        )
    }
}

fn default_packages() -> Vec<String> {
    vec![".".to_string()]
}

fn in_file(path: Option<&Path>) -> String {
    path.map(|p| format!(" {}", p.display())).unwrap_or_default()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("failed to parse config{}: {message}", in_file(.path.as_deref()))]
    Parse {
        /// File the content came from, if any.
        path: Option<PathBuf>,
        /// Parse error message.
        message: String,
    },
}
