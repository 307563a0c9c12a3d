//! Configuration management for `im`.
//!
//! Settings are resolved in layers, later layers winning:
//! - Built-in defaults
//! - YAML file (`--config`, else `.issues.yaml` in the working directory)
//! - Environment variables (`IM_FILE`, `IM_LOG_FORMAT`)
//! - Command-line flags

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".issues.yaml";
/// Issue file used when nothing else names one.
pub const DEFAULT_DATA_FILE: &str = "issues.txt";

pub const FILE_ENV: &str = "IM_FILE";
pub const LOG_FORMAT_ENV: &str = "IM_LOG_FORMAT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::InvalidValue {
                key: LOG_FORMAT_ENV,
                value: s.to_string(),
            }),
        }
    }
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_file: PathBuf,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_format: LogFormat::default(),
        }
    }
}

/// Values taken from command-line flags.
///
/// `data_file` also carries `IM_FILE`, which clap reads for `--file`.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
}

impl Config {
    /// Resolve the configuration for this process.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed, or an
    /// environment variable holds an invalid value.
    pub fn load(overrides: &CliOverrides) -> Result<Self, ConfigError> {
        Self::load_with(overrides, Path::new("."), |key| std::env::var(key).ok())
    }

    /// Resolve the configuration against `cwd` and an environment lookup.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_with(
        overrides: &CliOverrides,
        cwd: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match &overrides.config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = cwd.join(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(env)?;

        if let Some(data_file) = &overrides.data_file {
            config.data_file.clone_from(data_file);
        }

        Ok(config)
    }

    /// Read a YAML config file.
    ///
    /// A relative `data_file` is taken relative to the config file's directory.
    ///
    /// # Errors
    ///
    /// Returns `Read` or `Parse` on failure.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = serde_yaml::from_str(&content).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if config.data_file.is_relative() {
            let dir = dunce::canonicalize(path)
                .ok()
                .and_then(|p| p.parent().map(Path::to_path_buf));
            if let Some(dir) = dir {
                config.data_file = dir.join(&config.data_file);
            }
        }

        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(file) = env(FILE_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_file = PathBuf::from(file);
        }
        if let Some(format) = env(LOG_FORMAT_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_format = format.parse()?;
        }
        Ok(())
    }
}
