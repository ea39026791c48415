//! Host operating system description

use serde::{Deserialize, Serialize};

/// Platform family the setup strategies are selected by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Posix,
    Windows,
}

impl OsFamily {
    /// Family of the host this binary was built for.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// File name of the java launcher under `<java home>/bin`
    #[must_use]
    pub fn java_binary(self) -> &'static str {
        match self {
            Self::Posix => "java",
            Self::Windows => "java.exe",
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Posix => f.write_str("posix"),
            Self::Windows => f.write_str("windows"),
        }
    }
}

/// Distribution details recorded as the server's OS fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsInfo {
    /// Distribution family, e.g. `redhat`, `suse`, `ubuntu`, `winsrv`
    pub family: String,
    /// Distribution name, e.g. `centos`, `sles`
    pub os_type: String,
    /// Major version, e.g. `7`
    pub version: String,
}

impl OsInfo {
    /// Value of `server.os_family`, used for server/agent compatibility checks
    #[must_use]
    pub fn family_fingerprint(&self) -> String {
        format!("{}{}", self.family, self.version)
    }

    /// Value of `server.os_type`, used to look up supported stacks
    #[must_use]
    pub fn type_fingerprint(&self) -> String {
        format!("{}{}", self.os_type, self.version)
    }
}
