use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// JDK selection and installation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    /// An operator supplied JDK was validated and recorded
    CustomAccepted { java_home: PathBuf },
    /// The previously recorded JDK is kept
    Reused { java_home: PathBuf },
    /// A managed release was chosen from the catalogue
    ReleaseSelected { id: String, description: String },
    InstallStarted { archive: PathBuf, install_dir: PathBuf },
    InstallRetrying { archive: PathBuf, reason: String },
    Installed { java_home: PathBuf },
    PolicyInstalled { security_dir: PathBuf },
}
