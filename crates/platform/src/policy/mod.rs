//! Platform strategy for account and environment handling
//!
//! The host family is detected once and bound to a [`PlatformPolicy`]
//! through [`policy_for`]; setup steps never branch on the OS themselves.

mod posix;
mod windows;

pub use posix::PosixPolicy;
pub use windows::WindowsPolicy;

use crate::process::ProcessOperations;
use async_trait::async_trait;
use hostsetup_errors::Error;
use hostsetup_prompt::Prompter;
use hostsetup_types::OsFamily;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of service account provisioning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserResolution {
    /// Account the server daemon runs under
    pub user: String,
    /// An OS account was created by this run
    pub created: bool,
}

impl UserResolution {
    fn kept(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            created: false,
        }
    }
}

/// Settings shared by the platform policies
#[derive(Debug, Clone)]
pub struct PolicySettings {
    /// Product name used in account comments and prompts
    pub product: String,
    /// Home directory of a newly created POSIX account
    pub account_home: PathBuf,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            product: "Ambari Server".to_string(),
            account_home: PathBuf::from("/var/lib/hostsetup/keys"),
        }
    }
}

/// Platform-specific capabilities
#[async_trait]
pub trait PlatformPolicy: Send + Sync {
    /// Family this policy was bound for
    fn family(&self) -> OsFamily;

    /// Account used when the operator does not pick one
    fn default_user(&self) -> &'static str;

    /// Decide, and where needed create, the account the server runs as.
    ///
    /// `existing` is the account recorded by an earlier run.
    async fn create_privileged_user(
        &self,
        existing: Option<&str>,
        prompter: &dyn Prompter,
    ) -> Result<UserResolution, Error>;

    /// Point the runtime-home variable `var` at `path`.
    async fn ensure_runtime_env_var(&self, var: &str, path: &Path) -> Result<(), Error>;
}

/// Bind the policy for `family`.
#[must_use]
pub fn policy_for(
    family: OsFamily,
    ops: Arc<dyn ProcessOperations>,
    settings: PolicySettings,
) -> Box<dyn PlatformPolicy> {
    match family {
        OsFamily::Posix => Box::new(PosixPolicy::new(ops, settings)),
        OsFamily::Windows => Box::new(WindowsPolicy::new(ops)),
    }
}

/// Ask whether to replace the recorded account or customize the default.
///
/// Returns `Some(resolution)` when the operator keeps the current choice.
async fn keep_current(
    existing: Option<&str>,
    default_user: &str,
    prompter: &dyn Prompter,
) -> Result<Option<UserResolution>, Error> {
    if let Some(user) = existing {
        let question =
            format!("Server daemon is configured to run under user '{user}'. Change this setting");
        if !prompter.confirm(&question, false).await? {
            return Ok(Some(UserResolution::kept(user)));
        }
    } else if !prompter
        .confirm("Customize user account for server daemon", false)
        .await?
    {
        return Ok(Some(UserResolution::kept(default_user)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::CommandOutput;
    use crate::testing::MockProcessOperations;
    use hostsetup_errors::PlatformError;
    use hostsetup_prompt::{Answer, ScriptedPrompter};

    fn posix(mock: MockProcessOperations) -> (Arc<MockProcessOperations>, Box<dyn PlatformPolicy>) {
        let mock = Arc::new(mock);
        let policy = policy_for(OsFamily::Posix, mock.clone(), PolicySettings::default());
        (mock, policy)
    }

    #[tokio::test]
    async fn test_existing_user_kept_when_declined() {
        let (mock, policy) = posix(MockProcessOperations::new());
        let prompter = ScriptedPrompter::new([Answer::No]);

        let resolution = policy
            .create_privileged_user(Some("svc"), &prompter)
            .await
            .unwrap();
        assert_eq!(resolution, UserResolution::kept("svc"));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_not_customized_defaults_to_root() {
        let (mock, policy) = posix(MockProcessOperations::new());
        let prompter = ScriptedPrompter::new([Answer::Default]);

        let resolution = policy.create_privileged_user(None, &prompter).await.unwrap();
        assert_eq!(resolution.user, "root");
        assert!(!resolution.created);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_useradd_exit_nine_means_exists() {
        let (mock, policy) = posix(
            MockProcessOperations::new().on("useradd", CommandOutput::failed(9, "user exists")),
        );
        let prompter = ScriptedPrompter::new([Answer::Yes, Answer::text("svc")]);

        let resolution = policy.create_privileged_user(None, &prompter).await.unwrap();
        assert_eq!(resolution, UserResolution::kept("svc"));
        let calls = mock.calls_to("useradd");
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("--shell /sbin/nologin"));
        assert!(calls[0].ends_with(" svc"));
    }

    #[tokio::test]
    async fn test_useradd_failure_carries_exit_code() {
        let (_mock, policy) = posix(
            MockProcessOperations::new().on("useradd", CommandOutput::failed(4, "locked")),
        );
        let prompter = ScriptedPrompter::new([Answer::Yes, Answer::text("svc")]);

        let err = policy
            .create_privileged_user(None, &prompter)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::UserProvisioning { exit_code: 4, .. })
        ));
        assert_eq!(err.exit_code(), 4);
    }

    #[tokio::test]
    async fn test_windows_default_identity_skips_creation() {
        let mock = Arc::new(MockProcessOperations::new());
        let policy = policy_for(OsFamily::Windows, mock.clone(), PolicySettings::default());
        let prompter = ScriptedPrompter::new([Answer::Yes, Answer::Default]);

        let resolution = policy.create_privileged_user(None, &prompter).await.unwrap();
        assert_eq!(resolution.user, r"NT AUTHORITY\SYSTEM");
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_windows_existing_account_and_logon_right() {
        let mock = Arc::new(
            MockProcessOperations::new()
                .on(
                    "net user",
                    CommandOutput::new(2, "The account already exists.", ""),
                )
                .on("ntrights", CommandOutput::ok("")),
        );
        let policy = policy_for(OsFamily::Windows, mock.clone(), PolicySettings::default());
        let prompter =
            ScriptedPrompter::new([Answer::Yes, Answer::text("svcuser"), Answer::text("pw")]);

        let resolution = policy.create_privileged_user(None, &prompter).await.unwrap();
        assert_eq!(resolution, UserResolution::kept("svcuser"));
        assert_eq!(
            mock.calls_to("ntrights"),
            vec!["ntrights +r SeServiceLogonRight -u svcuser".to_string()]
        );
    }

    #[tokio::test]
    async fn test_windows_setx_failure() {
        let mock = Arc::new(MockProcessOperations::new().on("setx", CommandOutput::failed(1, "denied")));
        let policy = WindowsPolicy::new(mock);

        let err = policy
            .ensure_runtime_env_var("HOSTSETUP_TEST_SETX_HOME", Path::new(r"C:\jdk1.7.0_67"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Platform(PlatformError::EnvironmentSet { exit_code: 1, .. })
        ));
    }
}
