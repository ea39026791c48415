//! Integration tests for prompt

#[cfg(test)]
mod tests {
    use hostsetup_errors::{Error, SetupError};
    use hostsetup_prompt::*;
    use regex::Regex;

    fn username_rule() -> Validation {
        Validation::new(
            Regex::new(r"^[a-z_][a-z0-9_-]{1,31}$").unwrap(),
            "Invalid username.",
        )
    }

    #[tokio::test]
    async fn test_unattended_takes_defaults() {
        let prompter = UnattendedPrompter;
        assert!(prompter.is_silent());
        assert!(prompter.confirm("Proceed?", true).await.unwrap());
        assert!(!prompter.confirm("Change?", false).await.unwrap());
        assert_eq!(
            prompter
                .ask("User:", "root", Some(&username_rule()))
                .await
                .unwrap(),
            "root"
        );
    }

    #[tokio::test]
    async fn test_scripted_reasks_until_valid() {
        let prompter = ScriptedPrompter::new([
            Answer::text("9bad"),
            Answer::text("Upper"),
            Answer::text("svc_user"),
        ]);
        let user = prompter
            .ask("Enter user account:", "root", Some(&username_rule()))
            .await
            .unwrap();
        assert_eq!(user, "svc_user");
        assert_eq!(prompter.asked().len(), 3);
        assert_eq!(prompter.remaining(), 0);
    }

    #[tokio::test]
    async fn test_scripted_default_and_confirm() {
        let prompter = ScriptedPrompter::new([Answer::Default, Answer::No, Answer::text("")]);
        assert!(prompter.confirm("Proceed?", true).await.unwrap());
        assert!(!prompter.confirm("Proceed?", true).await.unwrap());
        assert_eq!(prompter.ask("Port:", "5432", None).await.unwrap(), "5432");
    }

    #[tokio::test]
    async fn test_scripted_exhausted_is_error() {
        let prompter = ScriptedPrompter::default();
        let err = prompter.confirm("Anything?", false).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Setup(SetupError::NoAnswer { ref question }) if question == "Anything?"
        ));
    }

    #[tokio::test]
    async fn test_unattended_without_default_is_no_answer() {
        let prompter = UnattendedPrompter;

        let err = prompter
            .ask("Path to JAVA_HOME", "", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Setup(SetupError::NoAnswer { ref question }) if question == "Path to JAVA_HOME"
        ));

        let err = prompter
            .password("Enter password for user svc", "")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Setup(SetupError::NoAnswer { .. })));

        // An explicitly optional answer may stay empty
        let optional = username_rule().allow_empty();
        assert_eq!(
            prompter.ask("Suffix", "", Some(&optional)).await.unwrap(),
            ""
        );
        assert_eq!(
            prompter.password("Database password", "bigdata").await.unwrap(),
            "bigdata"
        );
    }

    #[test]
    fn test_validation_allow_empty() {
        let rule = username_rule();
        assert!(!rule.accepts(""));
        assert!(rule.allow_empty().accepts(""));
    }

    #[test]
    fn test_for_mode_selects_unattended_when_silent() {
        assert!(for_mode(true).is_silent());
        assert!(!for_mode(false).is_silent());
    }
}
