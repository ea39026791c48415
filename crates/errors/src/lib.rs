#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Error types for hostsetup
//!
//! This crate provides fine-grained error types organized by domain.
//! Every error is fatal by the time it reaches the CLI: recoverable
//! conditions travel as warning events instead. Each variant maps to a
//! process exit status through [`Error::exit_code`].

use std::borrow::Cow;

use thiserror::Error;

pub mod config;
pub mod database;
pub mod network;
pub mod platform;
pub mod runtime;
pub mod setup;

// Re-export all error types at the root
pub use config::ConfigError;
pub use database::DatabaseError;
pub use network::NetworkError;
pub use platform::PlatformError;
pub use runtime::RuntimeError;
pub use setup::SetupError;

/// Exit status used when no more specific code applies.
pub const EXIT_FAILURE: i32 = 1;

/// Exit status for operations attempted without elevated privileges.
pub const EXIT_NOT_PRIVILEGED: i32 = 4;

/// Generic error type for cross-crate boundaries
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("{0}")]
    Setup(#[from] SetupError),

    /// A fatal failure annotated with the setup step that produced it.
    #[error("{step} failed: {source}")]
    Step { step: String, source: Box<Error> },

    #[error("internal error: {0}")]
    Internal(String),

    #[error("I/O error: {message}")]
    Io {
        #[cfg_attr(feature = "serde", serde(with = "io_kind_as_str"))]
        kind: std::io::ErrorKind,
        message: String,
        path: Option<std::path::PathBuf>,
    },
}

impl Error {
    /// Create an internal error with a message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an Io error with an associated path
    pub fn io_with_path(err: &std::io::Error, path: impl Into<std::path::PathBuf>) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: Some(path.into()),
        }
    }

    /// Annotate this error with the description of the failing step.
    #[must_use]
    pub fn in_step(self, step: impl Into<String>) -> Self {
        Self::Step {
            step: step.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping step annotations.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Step { source, .. } => source.root(),
            other => other,
        }
    }

    /// Process exit status for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Step { source, .. } => source.exit_code(),
            Self::Platform(err) => err.exit_code(),
            Self::Runtime(err) => err.exit_code(),
            Self::Setup(err) => err.exit_code(),
            Self::Config(_)
            | Self::Network(_)
            | Self::Database(_)
            | Self::Internal(_)
            | Self::Io { .. } => EXIT_FAILURE,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
            path: None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON error: {err}"))
    }
}

/// Result type alias for hostsetup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Minimal interface for rendering user-facing error information without
/// requiring heavyweight envelopes.
pub trait UserFacingError {
    /// Short message suitable for CLI output.
    fn user_message(&self) -> Cow<'_, str>;

    /// Optional remediation hint.
    fn user_hint(&self) -> Option<&'static str> {
        None
    }

    /// Stable error code for structured reporting.
    fn user_code(&self) -> Option<&'static str> {
        None
    }
}

impl UserFacingError for Error {
    fn user_message(&self) -> Cow<'_, str> {
        match self {
            Error::Io { message, .. } => Cow::Borrowed(message.as_str()),
            _ => Cow::Owned(self.to_string()),
        }
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Error::Step { source, .. } => source.user_hint(),
            Error::Config(err) => err.user_hint(),
            Error::Runtime(err) => err.user_hint(),
            Error::Setup(err) => err.user_hint(),
            Error::Database(err) => err.user_hint(),
            Error::Network(_) => Some("Check network connectivity and proxy settings."),
            _ => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        match self {
            Error::Step { source, .. } => source.user_code(),
            Error::Config(err) => err.user_code(),
            Error::Platform(err) => err.user_code(),
            Error::Network(_) => Some("network.failed"),
            Error::Runtime(err) => err.user_code(),
            Error::Database(_) => Some("database.failed"),
            Error::Setup(err) => err.user_code(),
            Error::Internal(_) => Some("error.internal"),
            Error::Io { .. } => Some("error.io"),
        }
    }
}

#[cfg(feature = "serde")]
mod io_kind_as_str {
    use serde::{Deserialize, Deserializer, Serializer};
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S>(kind: &std::io::ErrorKind, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&format!("{kind:?}"))
    }
    pub fn deserialize<'de, D>(deserializer: D) -> Result<std::io::ErrorKind, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "NotFound" => std::io::ErrorKind::NotFound,
            "PermissionDenied" => std::io::ErrorKind::PermissionDenied,
            "AlreadyExists" => std::io::ErrorKind::AlreadyExists,
            "InvalidInput" => std::io::ErrorKind::InvalidInput,
            "InvalidData" => std::io::ErrorKind::InvalidData,
            "UnexpectedEof" => std::io::ErrorKind::UnexpectedEof,
            _ => std::io::ErrorKind::Other,
        })
    }
}
