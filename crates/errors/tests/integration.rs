//! Integration tests for error types

#[cfg(test)]
mod tests {
    use hostsetup_errors::*;

    #[test]
    fn test_error_conversion() {
        let err: Error = NetworkError::Timeout {
            url: "https://example.com".into(),
        }
        .into();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn test_not_privileged_exits_with_four() {
        let err: Error = SetupError::NotPrivileged {
            command: "setup".into(),
        }
        .into();
        assert_eq!(err.exit_code(), EXIT_NOT_PRIVILEGED);
    }

    #[test]
    fn test_command_exit_code_is_propagated_through_steps() {
        let err: Error = PlatformError::UserProvisioning {
            user: "svc".into(),
            exit_code: 6,
            stderr: "group missing".into(),
        }
        .into();
        let wrapped = err.in_step("Creating service user");
        assert_eq!(wrapped.exit_code(), 6);
        assert!(wrapped.to_string().starts_with("Creating service user failed"));
        assert!(matches!(
            wrapped.root(),
            Error::Platform(PlatformError::UserProvisioning { .. })
        ));
    }

    #[test]
    fn test_invalid_runtime_path_exits_with_one() {
        let err: Error = RuntimeError::InvalidRuntimePath {
            path: "/opt/nojdk".into(),
        }
        .into();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.user_code(), Some("runtime.invalid_path"));
        assert!(err.user_hint().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();
        assert!(matches!(
            err,
            Error::Io {
                kind: std::io::ErrorKind::PermissionDenied,
                ..
            }
        ));
        assert_eq!(err.user_message(), "denied");
    }
}
