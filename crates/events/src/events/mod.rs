use serde::{Deserialize, Serialize};

use hostsetup_errors::UserFacingError;

/// Structured failure information shared across domains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(Into::into),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(Into::into),
        }
    }
}

pub mod download;
pub mod general;
pub mod runtime;
pub mod setup;

pub use download::*;
pub use general::*;
pub use runtime::*;
pub use setup::*;

/// Top-level application event enum that aggregates all domain-specific events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event", rename_all = "snake_case")]
pub enum AppEvent {
    /// General utility events (info, warnings, errors)
    General(GeneralEvent),

    /// Orchestrator step progress
    Setup(SetupEvent),

    /// File downloads
    Download(DownloadEvent),

    /// JDK selection and installation
    Runtime(RuntimeEvent),
}

impl AppEvent {
    /// Determine the appropriate tracing log level for this event
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        use tracing::Level;

        match self {
            Self::General(GeneralEvent::Error { .. })
            | Self::Setup(SetupEvent::StepFailed { .. })
            | Self::Download(DownloadEvent::Failed { .. }) => Level::ERROR,

            Self::General(GeneralEvent::Warning { .. })
            | Self::Runtime(RuntimeEvent::InstallRetrying { .. }) => Level::WARN,

            Self::General(GeneralEvent::DebugLog { .. }) => Level::DEBUG,

            _ => Level::INFO,
        }
    }

    /// Get the log target for this event (for structured logging)
    #[must_use]
    pub fn log_target(&self) -> &'static str {
        match self {
            Self::General(_) => "hostsetup::events::general",
            Self::Setup(_) => "hostsetup::events::setup",
            Self::Download(_) => "hostsetup::events::download",
            Self::Runtime(_) => "hostsetup::events::runtime",
        }
    }
}
