#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for hostsetup
//!
//! This crate sits between the CLI and the component crates. Each public
//! operation runs its steps strictly in order and stops at the first fatal
//! error, which comes back annotated with the step that failed. Recoverable
//! conditions are reported as warning events and do not stop the run.

mod context;
mod permissions;
mod policy;
mod reset;
mod security;
mod setup;
mod types;
mod views;

pub use context::{OpsContextBuilder, OpsCtx, RunState};
pub use types::{SetupReport, ViewOutcome};

// Re-export operation functions
pub use permissions::adjust_directory_permissions;
pub use policy::setup_policy;
pub use reset::reset;
pub use security::{disable_security_enhancements, verify_setup_allowed};
pub use setup::setup;
pub use views::extract_views;

use hostsetup_config::Properties;
use hostsetup_errors::Error;
use std::path::PathBuf;

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OperationResult {
    /// Setup report
    Setup(SetupReport),
    /// Database that was reset
    Reset(String),
    /// Security directory the policy bundle was unpacked into
    PolicyInstalled(PathBuf),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load the server properties file named by the configuration.
///
/// # Errors
///
/// Returns `LoadFailed` or `ParseError` from the property store.
pub async fn load_properties(ctx: &OpsCtx) -> Result<Properties, Error> {
    Properties::load(&ctx.config.properties_file()).await
}
