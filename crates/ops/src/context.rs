//! Operations context for dependency injection

use hostsetup_config::Config;
use hostsetup_errors::{Error, SetupError};
use hostsetup_events::{AppEvent, EventEmitter, EventSender, FailureContext, SetupEvent};
use hostsetup_net::Downloader;
use hostsetup_platform::{policy_for, PlatformPolicy, PolicySettings, ProcessOperations};
use hostsetup_prompt::Prompter;
use hostsetup_runtime::{installer_for, RuntimeInstaller};
use hostsetup_types::{OsFamily, OsInfo};
use std::future::Future;
use std::sync::Arc;

/// Operations context providing access to every collaborator of a run
pub struct OpsCtx {
    /// Tool configuration
    pub config: Config,
    /// Detected platform family
    pub family: OsFamily,
    /// Command execution boundary
    pub ops: Arc<dyn ProcessOperations>,
    /// Platform strategy bound for `family`
    pub policy: Box<dyn PlatformPolicy>,
    pub downloader: Box<dyn Downloader>,
    pub installer: Box<dyn RuntimeInstaller>,
    pub prompter: Box<dyn Prompter>,
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// Fixed OS description, detected from the host when absent
    pub os_info: Option<OsInfo>,
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

impl OpsCtx {
    /// Run one step, reporting its lifecycle and tagging a failure with
    /// the step description.
    pub(crate) async fn step<T, F>(&self, step: &str, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        self.emit_step_started(step);
        match fut.await {
            Ok(value) => {
                self.emit_step_completed(step);
                Ok(value)
            }
            Err(e) => {
                self.emit(AppEvent::Setup(SetupEvent::StepFailed {
                    step: step.to_string(),
                    failure: FailureContext::from_error(&e),
                }));
                Err(e.in_step(step))
            }
        }
    }

    #[must_use]
    pub fn is_silent(&self) -> bool {
        self.prompter.is_silent()
    }
}

/// Per-run state threaded between setup steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// The JDK was supplied by the operator, so no policy bundle is unpacked
    pub custom_runtime: bool,
}

/// Builder for operations context
pub struct OpsContextBuilder {
    config: Option<Config>,
    family: Option<OsFamily>,
    ops: Option<Arc<dyn ProcessOperations>>,
    policy: Option<Box<dyn PlatformPolicy>>,
    downloader: Option<Box<dyn Downloader>>,
    installer: Option<Box<dyn RuntimeInstaller>>,
    prompter: Option<Box<dyn Prompter>>,
    tx: Option<EventSender>,
    os_info: Option<OsInfo>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            family: None,
            ops: None,
            policy: None,
            downloader: None,
            installer: None,
            prompter: None,
            tx: None,
            os_info: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the platform family; defaults to the build target's
    #[must_use]
    pub fn with_family(mut self, family: OsFamily) -> Self {
        self.family = Some(family);
        self
    }

    #[must_use]
    pub fn with_process_ops(mut self, ops: Arc<dyn ProcessOperations>) -> Self {
        self.ops = Some(ops);
        self
    }

    /// Override the platform strategy bound from the family
    #[must_use]
    pub fn with_policy(mut self, policy: Box<dyn PlatformPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    #[must_use]
    pub fn with_downloader(mut self, downloader: Box<dyn Downloader>) -> Self {
        self.downloader = Some(downloader);
        self
    }

    /// Override the JDK installer bound from the family
    #[must_use]
    pub fn with_installer(mut self, installer: Box<dyn RuntimeInstaller>) -> Self {
        self.installer = Some(installer);
        self
    }

    #[must_use]
    pub fn with_prompter(mut self, prompter: Box<dyn Prompter>) -> Self {
        self.prompter = Some(prompter);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Use a fixed OS description instead of detecting it
    #[must_use]
    pub fn with_os_info(mut self, os_info: OsInfo) -> Self {
        self.os_info = Some(os_info);
        self
    }

    /// Build the context
    ///
    /// # Errors
    ///
    /// Returns an error if any required component is missing.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let config = self.config.unwrap_or_default();
        let family = self.family.unwrap_or_else(OsFamily::current);

        let ops = self.ops.ok_or_else(|| SetupError::MissingComponent {
            component: "process_ops".to_string(),
        })?;

        let downloader = self
            .downloader
            .ok_or_else(|| SetupError::MissingComponent {
                component: "downloader".to_string(),
            })?;

        let prompter = self.prompter.ok_or_else(|| SetupError::MissingComponent {
            component: "prompter".to_string(),
        })?;

        let tx = self.tx.ok_or_else(|| SetupError::MissingComponent {
            component: "event_sender".to_string(),
        })?;

        let policy = self.policy.unwrap_or_else(|| {
            let settings = PolicySettings {
                account_home: config.keys_dir(),
                ..PolicySettings::default()
            };
            policy_for(family, Arc::clone(&ops), settings)
        });

        let installer = self
            .installer
            .unwrap_or_else(|| installer_for(family, Arc::clone(&ops), config.log_dir()));

        Ok(OpsCtx {
            config,
            family,
            ops,
            policy,
            downloader,
            installer,
            prompter,
            tx,
            os_info: self.os_info,
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
