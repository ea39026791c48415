#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for hostsetup
//!
//! Two kinds of configuration live here:
//! - [`Properties`]: the server properties file the setup steps read and
//!   write, shared with the server itself
//! - [`Config`]: settings of the tool, merged from defaults, an optional
//!   `config.toml`, environment variables and CLI flags

pub mod constants;
pub mod properties;

pub use constants::keys;
pub use properties::Properties;

use hostsetup_errors::{ConfigError, Error};
use hostsetup_types::ColorChoice;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub paths: PathConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GeneralConfig {
    #[serde(default)]
    pub color: ColorChoice,
}

/// Path configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PathConfig {
    pub properties_file: Option<PathBuf>,
    pub conf_dir: Option<PathBuf>,
    pub lib_dir: Option<PathBuf>,
    pub pid_file: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub keys_dir: Option<PathBuf>,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
}

/// Runtime acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Environment variable that points at the JDK
    #[serde(default = "default_home_var")]
    pub home_var: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            home_var: default_home_var(),
        }
    }
}

fn default_timeout() -> u64 {
    600 // JDK archives are large
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_home_var() -> String {
    "JAVA_HOME".to_string()
}

impl Config {
    /// Get the default config file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the file contents
    /// contain invalid TOML syntax that cannot be parsed.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                line: e
                    .span()
                    .map_or(0, |span| contents[..span.start].matches('\n').count() + 1),
                message: e.message().to_string(),
            })
            .map_err(Into::into)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path();

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // HOSTSETUP_PROPERTIES
        if let Ok(file) = std::env::var("HOSTSETUP_PROPERTIES") {
            if file.trim().is_empty() {
                return Err(ConfigError::InvalidEnvVar {
                    var: "HOSTSETUP_PROPERTIES".to_string(),
                    value: file,
                }
                .into());
            }
            self.paths.properties_file = Some(PathBuf::from(file));
        }

        // HOSTSETUP_LOG_DIR
        if let Ok(dir) = std::env::var("HOSTSETUP_LOG_DIR") {
            if !dir.trim().is_empty() {
                self.paths.log_dir = Some(PathBuf::from(dir));
            }
        }

        // HOSTSETUP_TIMEOUT
        if let Ok(timeout) = std::env::var("HOSTSETUP_TIMEOUT") {
            self.network.timeout = timeout
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidEnvVar {
                    var: "HOSTSETUP_TIMEOUT".to_string(),
                    value: timeout,
                })?;
        }

        // HOSTSETUP_COLOR
        if let Ok(color) = std::env::var("HOSTSETUP_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidEnvVar {
                        var: "HOSTSETUP_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        Ok(())
    }

    /// Get the server properties file (with default)
    #[must_use]
    pub fn properties_file(&self) -> PathBuf {
        self.paths
            .properties_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::PROPERTIES_FILE))
    }

    /// Get the configuration directory (with default)
    #[must_use]
    pub fn conf_dir(&self) -> PathBuf {
        self.paths
            .conf_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::CONF_DIR))
    }

    /// Get the server library directory (with default)
    #[must_use]
    pub fn lib_dir(&self) -> PathBuf {
        self.paths
            .lib_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::LIB_DIR))
    }

    /// Get the server pid file (with default)
    #[must_use]
    pub fn pid_file(&self) -> PathBuf {
        self.paths
            .pid_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::PID_FILE))
    }

    /// Get the log directory (with default)
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.paths
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::LOGS_DIR))
    }

    /// Home directory given to a newly created service account
    #[must_use]
    pub fn keys_dir(&self) -> PathBuf {
        self.paths
            .keys_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::KEYS_DIR))
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.network.timeout)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.network.connect_timeout)
    }
}
