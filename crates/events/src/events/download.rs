use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Download lifecycle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DownloadEvent {
    Started {
        url: String,
        dest: PathBuf,
        total_bytes: Option<u64>,
    },
    Completed {
        url: String,
        dest: PathBuf,
        bytes_downloaded: u64,
    },
    Failed {
        url: String,
        message: String,
    },
    /// The artifact already exists locally and is reused
    Reused { dest: PathBuf },
}
