//! Command execution boundary
//!
//! Every external program the setup steps run goes through
//! [`ProcessOperations`], so the steps can be exercised against a scripted
//! implementation.

use async_trait::async_trait;
use hostsetup_errors::{Error, PlatformError};
use hostsetup_events::{EventEmitter, EventSender};
use std::path::PathBuf;
use std::time::Instant;
use tokio::process::Command;

/// Platform-specific command builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCommand {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    env_vars: Vec<(String, String)>,
}

impl PlatformCommand {
    /// Create a new platform command
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env_vars: Vec::new(),
        }
    }

    /// Add an argument to the command
    pub fn arg<S: AsRef<str>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Set the working directory for the command
    pub fn current_dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set an environment variable for the command
    pub fn env(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn get_current_dir(&self) -> Option<&PathBuf> {
        self.current_dir.as_ref()
    }

    #[must_use]
    pub fn get_env_vars(&self) -> &[(String, String)] {
        &self.env_vars
    }

    /// Command line as shown in logs and error messages
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Output from command execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status, `-1` when the process was terminated by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Successful run printing `stdout`
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self::new(0, stdout, "")
    }

    /// Failed run with `exit_code` and `stderr`
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::new(exit_code, "", stderr)
    }

    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout followed by stderr, for pattern matching over installer logs
    #[must_use]
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }

    /// Turn a non-zero exit into `PlatformError::CommandFailed`.
    ///
    /// # Errors
    ///
    /// Returns the command failure when the exit code is not zero.
    pub fn into_result(self, command: &PlatformCommand) -> Result<Self, Error> {
        if self.success() {
            Ok(self)
        } else {
            Err(PlatformError::CommandFailed {
                command: command.display(),
                exit_code: self.exit_code,
                stderr: self.stderr.trim().to_string(),
            }
            .into())
        }
    }
}

/// Trait for process execution operations
#[async_trait]
pub trait ProcessOperations: Send + Sync {
    /// Execute a command and return its output.
    ///
    /// A non-zero exit is not an error here; callers decide what each code
    /// means. A program that does not exist yields
    /// `PlatformError::CommandNotFound`.
    async fn execute_command(&self, cmd: PlatformCommand) -> Result<CommandOutput, Error>;

    /// Find the path to an executable
    fn which(&self, program: &str) -> Option<PathBuf>;
}

/// Runs commands on the local host
#[derive(Debug, Clone, Default)]
pub struct HostProcessOperations {
    tx: Option<EventSender>,
}

impl HostProcessOperations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report each executed command as a debug event
    #[must_use]
    pub fn with_events(tx: EventSender) -> Self {
        Self { tx: Some(tx) }
    }
}

impl EventEmitter for HostProcessOperations {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

#[async_trait]
impl ProcessOperations for HostProcessOperations {
    async fn execute_command(&self, cmd: PlatformCommand) -> Result<CommandOutput, Error> {
        let start = Instant::now();
        self.emit_debug(format!("running: {}", cmd.display()));

        let mut command = Command::new(cmd.program());
        command.args(cmd.get_args());

        if let Some(dir) = cmd.get_current_dir() {
            command.current_dir(dir);
        }

        for (key, value) in cmd.get_env_vars() {
            command.env(key, value);
        }

        let output = command.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlatformError::CommandNotFound {
                    command: cmd.program().to_string(),
                }
            } else {
                PlatformError::ProcessExecutionFailed {
                    command: cmd.display(),
                    message: e.to_string(),
                }
            }
        })?;

        let result = CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        self.emit_debug(format!(
            "{} exited with {} after {}ms",
            cmd.program(),
            result.exit_code,
            start.elapsed().as_millis()
        ));

        Ok(result)
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_program_and_args() {
        let mut cmd = PlatformCommand::new("tar");
        cmd.args(["--no-same-owner", "-xvf", "/tmp/jdk.tar.gz"])
            .current_dir("/usr/jdk64");
        assert_eq!(cmd.display(), "tar --no-same-owner -xvf /tmp/jdk.tar.gz");
        assert_eq!(cmd.get_current_dir(), Some(&PathBuf::from("/usr/jdk64")));
    }

    #[test]
    fn test_into_result_keeps_exit_code() {
        let cmd = PlatformCommand::new("setenforce");
        let err = CommandOutput::failed(5, "denied\n")
            .into_result(&cmd)
            .unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }
}
