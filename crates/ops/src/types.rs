//! Types for operations and results

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// What a completed `setup` left on the host
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SetupReport {
    /// Only the JDBC driver was registered; every other step was skipped
    pub driver_only: bool,
    /// Symlink of a driver registered by this run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jdbc_driver: Option<PathBuf>,
    /// Account the server daemon runs under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_home: Option<PathBuf>,
    pub custom_runtime: bool,
    /// Recorded `server.os_type`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_type: Option<String>,
    /// Menu label of the configured database
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// View archives handed to the extractor
    pub views: Vec<ViewOutcome>,
}

/// Result of extracting one view archive
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOutcome {
    pub archive: String,
    pub exit_code: i32,
}

impl ViewOutcome {
    /// The extractor reported a broken archive
    #[must_use]
    pub fn failed(&self) -> bool {
        self.exit_code == crate::views::EXIT_EXTRACT_ERROR
    }
}
