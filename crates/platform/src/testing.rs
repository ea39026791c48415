//! Scripted command execution for tests

use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};
use async_trait::async_trait;
use hostsetup_errors::{Error, PlatformError};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

/// `ProcessOperations` that replays scripted outputs and records calls.
///
/// Responses are keyed by `"program first-arg"` or by `"program"` alone;
/// the more specific key wins. One-shot responses queued with [`Self::on`]
/// are consumed in order before a sticky response from [`Self::always`]
/// is used. A program with no response is reported as not found.
#[derive(Debug, Default)]
pub struct MockProcessOperations {
    queued: Mutex<HashMap<String, VecDeque<CommandOutput>>>,
    sticky: Mutex<HashMap<String, CommandOutput>>,
    calls: Mutex<Vec<PlatformCommand>>,
}

impl MockProcessOperations {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot response
    #[must_use]
    pub fn on(self, key: &str, output: CommandOutput) -> Self {
        if let Ok(mut queued) = self.queued.lock() {
            queued.entry(key.to_string()).or_default().push_back(output);
        }
        self
    }

    /// Response used whenever no one-shot response is queued
    #[must_use]
    pub fn always(self, key: &str, output: CommandOutput) -> Self {
        if let Ok(mut sticky) = self.sticky.lock() {
            sticky.insert(key.to_string(), output);
        }
        self
    }

    /// Every command executed so far
    #[must_use]
    pub fn calls(&self) -> Vec<PlatformCommand> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Command lines of calls to `program`
    #[must_use]
    pub fn calls_to(&self, program: &str) -> Vec<String> {
        self.calls()
            .iter()
            .filter(|c| c.program() == program)
            .map(PlatformCommand::display)
            .collect()
    }

    fn response(&self, cmd: &PlatformCommand) -> Option<CommandOutput> {
        let specific = cmd
            .get_args()
            .first()
            .map(|arg| format!("{} {arg}", cmd.program()));
        let keys: Vec<&str> = specific
            .as_deref()
            .into_iter()
            .chain(std::iter::once(cmd.program()))
            .collect();

        let mut queued = self.queued.lock().ok()?;
        for key in &keys {
            if let Some(output) = queued.get_mut(*key).and_then(VecDeque::pop_front) {
                return Some(output);
            }
        }
        drop(queued);

        let sticky = self.sticky.lock().ok()?;
        keys.iter().find_map(|key| sticky.get(*key).cloned())
    }
}

#[async_trait]
impl ProcessOperations for MockProcessOperations {
    async fn execute_command(&self, cmd: PlatformCommand) -> Result<CommandOutput, Error> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(cmd.clone());
        }
        self.response(&cmd).ok_or_else(|| {
            PlatformError::CommandNotFound {
                command: cmd.program().to_string(),
            }
            .into()
        })
    }

    fn which(&self, program: &str) -> Option<PathBuf> {
        let known = self
            .queued
            .lock()
            .map(|q| q.keys().any(|k| k.split(' ').next() == Some(program)))
            .unwrap_or(false)
            || self
                .sticky
                .lock()
                .map(|s| s.keys().any(|k| k.split(' ').next() == Some(program)))
                .unwrap_or(false);
        known.then(|| PathBuf::from("/usr/bin").join(program))
    }
}
