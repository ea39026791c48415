//! Configuration error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ConfigError {
    /// The properties file is missing or unreadable.
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: String, message: String },

    #[error("parse error in {path} line {line}: {message}")]
    ParseError {
        path: String,
        line: usize,
        message: String,
    },

    #[error("property {key} is not defined in {path}")]
    MissingKey { key: String, path: String },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("environment variable {var} has invalid value: {value}")]
    InvalidEnvVar { var: String, value: String },

    #[error("failed to write config to {path}: {error}")]
    WriteError { path: String, error: String },
}

impl UserFacingError for ConfigError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::LoadFailed { .. } => {
                Some("Make sure the server properties file exists and is readable.")
            }
            Self::MissingKey { .. } => {
                Some("Add the missing property noted in the error message and retry.")
            }
            Self::ParseError { .. } | Self::InvalidValue { .. } | Self::InvalidEnvVar { .. } => {
                Some("Fix the configuration value and retry the command.")
            }
            Self::WriteError { .. } => Some("Ensure the properties file is writable and retry."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::LoadFailed { .. } => "config.load_failed",
            Self::ParseError { .. } => "config.parse_error",
            Self::MissingKey { .. } => "config.missing_key",
            Self::InvalidValue { .. } | Self::InvalidEnvVar { .. } => "config.invalid_value",
            Self::WriteError { .. } => "config.write_failed",
        })
    }
}
