//! Canned answers

use crate::{Prompter, Validation};
use async_trait::async_trait;
use hostsetup_errors::{Error, SetupError};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Text(String),
    /// Take whatever default the question offers
    Default,
}

impl Answer {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Replays a fixed sequence of answers and records every question asked.
///
/// Running out of answers is an error rather than a hang, so a flow that
/// asks more than expected fails loudly.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far, in order
    #[must_use]
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|q| q.clone()).unwrap_or_default()
    }

    /// Answers not yet consumed
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or_default()
    }

    fn next(&self, question: &str) -> Result<Answer, Error> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(question.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .ok_or_else(|| {
                SetupError::NoAnswer {
                    question: question.to_string(),
                }
                .into()
            })
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn confirm(&self, question: &str, default: bool) -> Result<bool, Error> {
        match self.next(question)? {
            Answer::Yes => Ok(true),
            Answer::No => Ok(false),
            Answer::Default => Ok(default),
            Answer::Text(text) => Ok(matches!(text.trim(), "y" | "Y" | "yes" | "YES")),
        }
    }

    async fn ask(
        &self,
        question: &str,
        default: &str,
        validation: Option<&Validation>,
    ) -> Result<String, Error> {
        loop {
            let answer = match self.next(question)? {
                Answer::Text(text) if text.is_empty() => default.to_string(),
                Answer::Text(text) => text,
                Answer::Default | Answer::Yes | Answer::No => default.to_string(),
            };
            match validation {
                Some(v) if answer != default && !v.accepts(&answer) => continue,
                _ => return Ok(answer),
            }
        }
    }

    async fn password(&self, question: &str, default: &str) -> Result<String, Error> {
        match self.next(question)? {
            Answer::Text(text) if !text.is_empty() => Ok(text),
            _ => Ok(default.to_string()),
        }
    }
}
