//! Interactive terminal prompts

use crate::{Prompter, Validation};
use async_trait::async_trait;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password};
use hostsetup_errors::{Error, SetupError};

/// Terminal prompter backed by dialoguer.
///
/// dialoguer blocks on stdin, so each question runs on the blocking pool.
/// The task yields first, which lets the CLI flush queued events to the
/// console before the question appears.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompter;

impl ConsolePrompter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

async fn blocking<T, F>(f: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, dialoguer::Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::yield_now().await;
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::internal(format!("prompt task failed: {e}")))?
        .map_err(|e| {
            SetupError::Prompt {
                message: e.to_string(),
            }
            .into()
        })
}

#[async_trait]
impl Prompter for ConsolePrompter {
    async fn confirm(&self, question: &str, default: bool) -> Result<bool, Error> {
        let question = question.to_string();
        blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(question)
                .default(default)
                .interact()
        })
        .await
    }

    async fn ask(
        &self,
        question: &str,
        default: &str,
        validation: Option<&Validation>,
    ) -> Result<String, Error> {
        let question = question.to_string();
        let default = default.to_string();
        let validation = validation.cloned();

        blocking(move || {
            let theme = ColorfulTheme::default();
            let mut input = Input::<String>::with_theme(&theme)
                .with_prompt(question)
                .allow_empty(true);
            if !default.is_empty() {
                input = input.default(default.clone());
            }
            if let Some(validation) = validation {
                let default = default.clone();
                input = input.validate_with(move |answer: &String| -> Result<(), String> {
                    if *answer == default || validation.accepts(answer) {
                        Ok(())
                    } else {
                        Err(validation.message.clone())
                    }
                });
            }
            input.interact_text()
        })
        .await
    }

    async fn password(&self, question: &str, default: &str) -> Result<String, Error> {
        let question = question.to_string();
        let default = default.to_string();

        blocking(move || {
            let entered = Password::with_theme(&ColorfulTheme::default())
                .with_prompt(question)
                .with_confirmation("Re-enter password", "Passwords do not match")
                .allow_empty_password(!default.is_empty())
                .interact()?;
            Ok(if entered.is_empty() { default } else { entered })
        })
        .await
    }
}
