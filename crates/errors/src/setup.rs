//! Orchestration error types

use crate::{EXIT_FAILURE, EXIT_NOT_PRIVILEGED};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("you can't perform '{command}' as a non-root user")]
    NotPrivileged { command: String },

    #[error(
        "cannot run silent 'setup' with password encryption enabled and master key not persisted"
    )]
    SilentSetupNotAllowed,

    #[error("server must be stopped to {operation} (pid {pid})")]
    ServerRunning { operation: String, pid: u32 },

    #[error("{operation} cancelled by user")]
    Cancelled { operation: String },

    #[error("{message}")]
    SecurityEnhancement { message: String },

    #[error("no JDK found, run setup to install a JDK automatically or install one manually")]
    RuntimeMissing,

    #[error("a prompt required an answer but none was available: {question}")]
    NoAnswer { question: String },

    #[error("prompt failed: {message}")]
    Prompt { message: String },

    #[error("missing component: {component}")]
    MissingComponent { component: String },
}

impl SetupError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotPrivileged { .. } => EXIT_NOT_PRIVILEGED,
            _ => EXIT_FAILURE,
        }
    }

    #[must_use]
    pub fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotPrivileged { .. } => Some("Re-run the command as root or with sudo."),
            Self::SilentSetupNotAllowed => {
                Some("Persist the master key or run setup interactively.")
            }
            Self::ServerRunning { .. } => Some("Stop the server and retry."),
            Self::NoAnswer { .. } => Some("Run interactively or supply the value via flags."),
            _ => None,
        }
    }

    #[must_use]
    pub fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::NotPrivileged { .. } => "setup.not_privileged",
            Self::SilentSetupNotAllowed => "setup.silent_not_allowed",
            Self::ServerRunning { .. } => "setup.server_running",
            Self::Cancelled { .. } => "setup.cancelled",
            Self::SecurityEnhancement { .. } => "setup.security",
            Self::RuntimeMissing => "setup.runtime_missing",
            Self::NoAnswer { .. } | Self::Prompt { .. } => "setup.prompt",
            Self::MissingComponent { .. } => "setup.internal",
        })
    }
}
