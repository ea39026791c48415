//! Database configuration error types

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DatabaseError {
    #[error("unsupported database name {name}")]
    UnsupportedKind { name: String },

    #[error("file {path} does not exist")]
    DriverNotFound { path: String },

    #[error(
        "can not copy file {from} to {to} due to: {message}. Please check file permissions and free disk space"
    )]
    DriverCopyFailed {
        from: String,
        to: String,
        message: String,
    },

    #[error("server not set up yet, nothing to reset")]
    NotConfigured,

    #[error("database setup failed: {message}")]
    SetupFailed { message: String },

    #[error("database reset failed: {message}")]
    ResetFailed { message: String },
}

impl DatabaseError {
    #[must_use]
    pub fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedKind { .. } => {
                Some("Supported names: postgres, oracle, mysql, mssql, sqlanywhere.")
            }
            Self::DriverNotFound { .. } => {
                Some("Pass the JDBC driver with --jdbc-driver <file> --jdbc-db <name>.")
            }
            Self::NotConfigured => Some("Run `hostsetup setup` first."),
            _ => None,
        }
    }
}
