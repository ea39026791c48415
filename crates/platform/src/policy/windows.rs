use super::{keep_current, PlatformPolicy, UserResolution};
use crate::process::{PlatformCommand, ProcessOperations};
use async_trait::async_trait;
use hostsetup_errors::{Error, PlatformError};
use hostsetup_prompt::{Prompter, Validation};
use hostsetup_types::OsFamily;
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

const DEFAULT_USER: &str = r"NT AUTHORITY\SYSTEM";
const USER_PATTERN: &str = r"^[A-Za-z0-9_.\\ -]{1,64}$";
const SERVICE_LOGON_RIGHT: &str = "SeServiceLogonRight";

/// Windows Server hosts
pub struct WindowsPolicy {
    ops: Arc<dyn ProcessOperations>,
}

impl WindowsPolicy {
    pub fn new(ops: Arc<dyn ProcessOperations>) -> Self {
        Self { ops }
    }

    async fn create_user(&self, user: &str, password: &str) -> Result<bool, Error> {
        let mut cmd = PlatformCommand::new("net");
        cmd.args(["user", user, password, "/add"]);
        let output = self.ops.execute_command(cmd).await?;

        if output.success() {
            return Ok(true);
        }
        if output.combined().to_lowercase().contains("already exists") {
            return Ok(false);
        }
        Err(PlatformError::UserProvisioning {
            user: user.to_string(),
            exit_code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        }
        .into())
    }

    async fn grant_service_logon(&self, user: &str) -> Result<(), Error> {
        let mut cmd = PlatformCommand::new("ntrights");
        cmd.args(["+r", SERVICE_LOGON_RIGHT, "-u", user]);
        let output = self.ops.execute_command(cmd).await?;

        if output.success() {
            Ok(())
        } else {
            Err(PlatformError::UserProvisioning {
                user: user.to_string(),
                exit_code: output.exit_code,
                stderr: format!(
                    "unable to grant {SERVICE_LOGON_RIGHT}: {}",
                    output.combined().trim()
                ),
            }
            .into())
        }
    }
}

#[async_trait]
impl PlatformPolicy for WindowsPolicy {
    fn family(&self) -> OsFamily {
        OsFamily::Windows
    }

    fn default_user(&self) -> &'static str {
        DEFAULT_USER
    }

    async fn create_privileged_user(
        &self,
        existing: Option<&str>,
        prompter: &dyn Prompter,
    ) -> Result<UserResolution, Error> {
        if let Some(kept) = keep_current(existing, DEFAULT_USER, prompter).await? {
            return Ok(kept);
        }

        let pattern = Regex::new(USER_PATTERN).map_err(|e| Error::internal(e.to_string()))?;
        let validation = Validation::new(pattern, "Invalid account name.");
        let user = prompter
            .ask(
                &format!("Enter user account for server service ({DEFAULT_USER})"),
                DEFAULT_USER,
                Some(&validation),
            )
            .await?;

        if user.eq_ignore_ascii_case(DEFAULT_USER) {
            return Ok(UserResolution::kept(DEFAULT_USER));
        }

        let password = prompter
            .password(&format!("Enter password for user {user}"), "")
            .await?;
        let created = self.create_user(&user, &password).await?;
        self.grant_service_logon(&user).await?;

        Ok(UserResolution { user, created })
    }

    async fn ensure_runtime_env_var(&self, var: &str, path: &Path) -> Result<(), Error> {
        let wanted = path.display().to_string();
        if std::env::var(var).ok().as_deref() == Some(wanted.as_str()) {
            return Ok(());
        }

        let mut cmd = PlatformCommand::new("setx");
        cmd.args([var, wanted.as_str(), "/M"]);
        let output = self.ops.execute_command(cmd).await?;
        if !output.success() {
            return Err(PlatformError::EnvironmentSet {
                var: var.to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            }
            .into());
        }

        // setx only affects new sessions
        std::env::set_var(var, path);
        Ok(())
    }
}
