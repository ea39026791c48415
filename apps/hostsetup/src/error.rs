//! CLI error handling

use std::fmt;

use hostsetup_errors::{UserFacingError, EXIT_FAILURE};

/// CLI-specific error type
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded
    Config(hostsetup_errors::Error),
    /// Operations error
    Ops(hostsetup_errors::Error),
    /// I/O error
    Io(std::io::Error),
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(e) | CliError::Ops(e) => e.exit_code(),
            CliError::Io(_) => EXIT_FAILURE,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e.user_message()),
            CliError::Ops(e) => {
                let message = e.user_message();
                write!(f, "{message}")?;
                if let Some(code) = e.user_code() {
                    write!(f, "\n  Code: {code}")?;
                }
                if let Some(hint) = e.user_hint() {
                    write!(f, "\n  Hint: {hint}")?;
                }
                Ok(())
            }
            CliError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) | CliError::Ops(e) => Some(e),
            CliError::Io(e) => Some(e),
        }
    }
}

impl From<hostsetup_errors::Error> for CliError {
    fn from(e: hostsetup_errors::Error) -> Self {
        CliError::Ops(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostsetup_errors::SetupError;

    #[test]
    fn test_ops_error_shows_code_and_exit_status() {
        let err: hostsetup_errors::Error = SetupError::Cancelled {
            operation: "reset".to_string(),
        }
        .into();
        let cli = CliError::from(err.in_step("Resetting database"));

        let rendered = cli.to_string();
        assert!(rendered.starts_with("Resetting database failed:"));
        assert!(rendered.contains("\n  Code: "));
        assert_eq!(cli.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_privilege_error_exit_status_survives_wrapping() {
        let err: hostsetup_errors::Error = SetupError::NotPrivileged {
            command: "setup".to_string(),
        }
        .into();
        let cli = CliError::Ops(err.in_step("Checking administrative privileges"));
        assert_eq!(cli.exit_code(), hostsetup_errors::EXIT_NOT_PRIVILEGED);
    }
}
