//! Integration tests for the hostsetup CLI

#[cfg(test)]
mod tests {
    use std::process::Command;

    #[test]
    fn test_cli_version() {
        let output = Command::new(env!("CARGO_BIN_EXE_hostsetup"))
            .arg("--version")
            .output()
            .expect("Failed to execute hostsetup");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("hostsetup"));
    }

    #[test]
    fn test_cli_help() {
        let output = Command::new(env!("CARGO_BIN_EXE_hostsetup"))
            .arg("--help")
            .output()
            .expect("Failed to execute hostsetup");

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("setup"));
        assert!(stdout.contains("reset"));
        assert!(stdout.contains("setup-policy"));
        assert!(stdout.contains("--silent"));
    }

    #[test]
    fn test_cli_invalid_command() {
        let output = Command::new(env!("CARGO_BIN_EXE_hostsetup"))
            .arg("invalid-command")
            .output()
            .expect("Failed to execute hostsetup");

        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("unrecognized subcommand"));
    }

    #[test]
    fn test_unknown_database_rejected() {
        let output = Command::new(env!("CARGO_BIN_EXE_hostsetup"))
            .args(["setup", "--database", "db2"])
            .output()
            .expect("Failed to execute hostsetup");

        assert!(!output.status.success());
    }

    #[test]
    fn test_missing_config_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let output = Command::new(env!("CARGO_BIN_EXE_hostsetup"))
            .arg("--config")
            .arg(&missing)
            .arg("reset")
            .env_remove("HOSTSETUP_TIMEOUT")
            .env_remove("HOSTSETUP_COLOR")
            .output()
            .expect("Failed to execute hostsetup");

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Configuration error"));
    }
}
