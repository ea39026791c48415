//! Managed runtime release descriptors

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A downloadable JDK distribution together with its JCE policy bundle.
///
/// Releases are immutable once constructed. They come either from the
/// `jdk.releases` catalogue in the server properties or from the built-in
/// defaults for the host's OS family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeRelease {
    /// Catalogue identifier, e.g. `jdk1.8`
    pub id: String,
    /// Human readable description shown in the selection menu
    pub description: String,
    /// Download URL of the JDK archive or installer
    pub url: String,
    /// File name the archive is stored under in the resources directory
    pub archive_file: String,
    /// Download URL of the JCE policy bundle
    pub policy_url: String,
    /// File name the policy bundle is stored under in the resources directory
    pub policy_file: String,
    /// Directory the JDK is installed into
    pub install_dir: PathBuf,
    /// Regex whose first capture group names the unpacked JDK directory
    pub version_pattern: String,
}

impl RuntimeRelease {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        archive_file: impl Into<String>,
        policy_url: impl Into<String>,
        policy_file: impl Into<String>,
        install_dir: impl Into<PathBuf>,
        version_pattern: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            url: url.into(),
            archive_file: archive_file.into(),
            policy_url: policy_url.into(),
            policy_file: policy_file.into(),
            install_dir: install_dir.into(),
            version_pattern: version_pattern.into(),
        }
    }
}

impl std::fmt::Display for RuntimeRelease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description, self.id)
    }
}
