//! Runtime (JDK) acquisition error types

use crate::EXIT_FAILURE;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuntimeError {
    #[error("path to java home {path} or java binary file does not exist")]
    InvalidRuntimePath { path: String },

    #[error("license agreement was not accepted")]
    LicenseDeclined,

    #[error(
        "failed to download JDK: {message}. Please check that the JDK is available at {url}. \
         Also you may specify a JDK on the local filesystem using --java-home"
    )]
    DownloadFailed { url: String, message: String },

    #[error("installation of JDK returned exit code {exit_code}")]
    InstallerFailed { exit_code: i32 },

    #[error("JDK installation failed, unknown file type: {archive}")]
    UnknownArchiveType { archive: String },

    #[error("installer output did not match version pattern `{pattern}`")]
    VersionNotFound { pattern: String },

    #[error("invalid version pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Installation could not be completed, retries included.
    #[error("unable to install JDK from {archive}: {reason}")]
    Install { archive: String, reason: String },

    #[error("failed to download JCE policy archive from {url}: {message}")]
    PolicyDownloadFailed { url: String, message: String },

    #[error("installing JCE policy failed for {path}: {message}")]
    PolicyBundle { path: String, message: String },
}

impl RuntimeError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InstallerFailed { exit_code } if *exit_code != 0 => *exit_code,
            _ => EXIT_FAILURE,
        }
    }

    #[must_use]
    pub fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidRuntimePath { .. } => {
                Some("Point --java-home at a directory containing bin/java.")
            }
            Self::LicenseDeclined => {
                Some("Install the JDK and JCE policy files manually, then re-run with --java-home.")
            }
            Self::Install { .. } => {
                Some("Remove the JDK archive from the resources directory and re-run setup.")
            }
            Self::PolicyBundle { .. } | Self::PolicyDownloadFailed { .. } => {
                Some("JCE policy files are required for Kerberos; install them with `setup-policy`.")
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::InvalidRuntimePath { .. } => "runtime.invalid_path",
            Self::LicenseDeclined => "runtime.license_declined",
            Self::DownloadFailed { .. } => "runtime.download_failed",
            Self::InstallerFailed { .. }
            | Self::UnknownArchiveType { .. }
            | Self::VersionNotFound { .. }
            | Self::Install { .. } => "runtime.install_failed",
            Self::InvalidPattern { .. } => "runtime.catalogue",
            Self::PolicyDownloadFailed { .. } | Self::PolicyBundle { .. } => "runtime.policy",
        })
    }
}
