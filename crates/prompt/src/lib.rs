#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Operator prompts for hostsetup
//!
//! Every question a setup step asks goes through the [`Prompter`] trait so
//! the steps never touch the terminal themselves. Three implementations
//! are provided:
//! - [`ConsolePrompter`]: interactive terminal prompts (dialoguer)
//! - [`UnattendedPrompter`]: silent mode, every question takes its default
//! - [`ScriptedPrompter`]: canned answers for tests and automation

mod console;
mod scripted;

pub use console::ConsolePrompter;
pub use scripted::{Answer, ScriptedPrompter};

use async_trait::async_trait;
use hostsetup_errors::{Error, SetupError};
use regex::Regex;

/// Answer constraint for free-text questions.
///
/// Input that does not match `pattern` is rejected with `message` and the
/// question is asked again.
#[derive(Debug, Clone)]
pub struct Validation {
    pub pattern: Regex,
    pub message: String,
    /// Accept an empty answer, which then yields the default
    pub allow_empty: bool,
}

impl Validation {
    #[must_use]
    pub fn new(pattern: Regex, message: impl Into<String>) -> Self {
        Self {
            pattern,
            message: message.into(),
            allow_empty: false,
        }
    }

    #[must_use]
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }

    /// Whether `answer` is acceptable.
    #[must_use]
    pub fn accepts(&self, answer: &str) -> bool {
        (self.allow_empty && answer.is_empty()) || self.pattern.is_match(answer)
    }
}

/// Source of operator answers.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Yes/no question.
    async fn confirm(&self, question: &str, default: bool) -> Result<bool, Error>;

    /// Free-text question, re-asked until the answer passes `validation`.
    async fn ask(
        &self,
        question: &str,
        default: &str,
        validation: Option<&Validation>,
    ) -> Result<String, Error>;

    /// Hidden input, confirmed by a second entry where interactive.
    async fn password(&self, question: &str, default: &str) -> Result<String, Error>;

    /// True when no operator is present and defaults are taken.
    fn is_silent(&self) -> bool {
        false
    }
}

/// Answers every question with its default.
///
/// An empty default counts as no default unless the question's validation
/// explicitly allows an empty answer; such questions fail with `NoAnswer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnattendedPrompter;

fn no_answer(question: &str) -> Error {
    SetupError::NoAnswer {
        question: question.to_string(),
    }
    .into()
}

#[async_trait]
impl Prompter for UnattendedPrompter {
    async fn confirm(&self, _question: &str, default: bool) -> Result<bool, Error> {
        Ok(default)
    }

    async fn ask(
        &self,
        question: &str,
        default: &str,
        validation: Option<&Validation>,
    ) -> Result<String, Error> {
        if default.is_empty() && !validation.is_some_and(|v| v.allow_empty) {
            return Err(no_answer(question));
        }
        Ok(default.to_string())
    }

    async fn password(&self, question: &str, default: &str) -> Result<String, Error> {
        if default.is_empty() {
            return Err(no_answer(question));
        }
        Ok(default.to_string())
    }

    fn is_silent(&self) -> bool {
        true
    }
}

/// Console prompter for interactive runs, unattended one for silent runs.
#[must_use]
pub fn for_mode(silent: bool) -> Box<dyn Prompter> {
    if silent {
        Box::new(UnattendedPrompter)
    } else {
        Box::new(ConsolePrompter::new())
    }
}
