use super::{keep_current, PlatformPolicy, PolicySettings, UserResolution};
use crate::process::{PlatformCommand, ProcessOperations};
use async_trait::async_trait;
use hostsetup_errors::{Error, PlatformError};
use hostsetup_prompt::{Prompter, Validation};
use hostsetup_types::OsFamily;
use regex::Regex;
use std::path::Path;
use std::sync::Arc;

const DEFAULT_USER: &str = "root";
const USER_PATTERN: &str = r"^[a-z_][a-z0-9_-]{1,31}$";
const NOLOGIN_SHELL: &str = "/sbin/nologin";

/// `useradd` exit code for an account that already exists
const USERADD_USER_EXISTS: i32 = 9;

/// Linux and other POSIX hosts
pub struct PosixPolicy {
    ops: Arc<dyn ProcessOperations>,
    settings: PolicySettings,
}

impl PosixPolicy {
    pub fn new(ops: Arc<dyn ProcessOperations>, settings: PolicySettings) -> Self {
        Self { ops, settings }
    }

    async fn create_user(&self, user: &str) -> Result<bool, Error> {
        let comment = format!("{} user", self.settings.product);
        let home = self.settings.account_home.display().to_string();

        let mut cmd = PlatformCommand::new("useradd");
        cmd.args([
            "-M",
            "--comment",
            comment.as_str(),
            "--shell",
            NOLOGIN_SHELL,
            "-d",
            home.as_str(),
            user,
        ]);

        let output = self.ops.execute_command(cmd).await?;
        match output.exit_code {
            0 => Ok(true),
            USERADD_USER_EXISTS => Ok(false),
            code => Err(PlatformError::UserProvisioning {
                user: user.to_string(),
                exit_code: code,
                stderr: output.stderr.trim().to_string(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl PlatformPolicy for PosixPolicy {
    fn family(&self) -> OsFamily {
        OsFamily::Posix
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
        let validation = Validation::new(pattern, "Invalid username.");
        let user = prompter
            .ask(
                &format!("Enter user account for server daemon ({DEFAULT_USER})"),
                DEFAULT_USER,
                Some(&validation),
            )
            .await?;

        if user == DEFAULT_USER {
            return Ok(UserResolution::kept(user));
        }

        let created = self.create_user(&user).await?;
        Ok(UserResolution { user, created })
    }

    async fn ensure_runtime_env_var(&self, var: &str, path: &Path) -> Result<(), Error> {
        // Only the current process and the children it spawns see this
        std::env::set_var(var, path);
        Ok(())
    }
}
