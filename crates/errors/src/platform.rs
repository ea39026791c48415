//! Platform-specific operation errors

use std::borrow::Cow;

use crate::{UserFacingError, EXIT_FAILURE};
use thiserror::Error;

/// Errors that can occur during platform-specific operations
#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlatformError {
    /// The command could not be spawned at all.
    #[error("process execution failed: {command} - {message}")]
    ProcessExecutionFailed { command: String, message: String },

    /// The command ran and reported a non-zero exit code.
    #[error("command `{command}` exited with code {exit_code}: {stderr}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("command not found: {command}")]
    CommandNotFound { command: String },

    #[error("can't create user {user}: command exited with code {exit_code}: {stderr}")]
    UserProvisioning {
        user: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("setting {var} failed with exit code {exit_code}: {stderr}")]
    EnvironmentSet {
        var: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("filesystem operation failed: {operation} on {path} - {message}")]
    FilesystemOperationFailed {
        operation: String,
        path: String,
        message: String,
    },

    #[error("platform capability not available: {capability}")]
    CapabilityUnavailable { capability: String },
}

impl PlatformError {
    /// Exit code propagated from the failing command where one exists.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { exit_code, .. } | Self::UserProvisioning { exit_code, .. }
                if *exit_code != 0 =>
            {
                *exit_code
            }
            _ => EXIT_FAILURE,
        }
    }
}

impl UserFacingError for PlatformError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::ProcessExecutionFailed { .. } | Self::CommandFailed { .. } => "platform.process",
            Self::CommandNotFound { .. } => "platform.command_not_found",
            Self::UserProvisioning { .. } => "platform.user_provisioning",
            Self::EnvironmentSet { .. } => "platform.environment_set",
            Self::FilesystemOperationFailed { .. } => "platform.filesystem",
            Self::CapabilityUnavailable { .. } => "platform.unavailable",
        })
    }
}
