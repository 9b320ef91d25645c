//! Deterministic [`CommandRunner`] for tests of crates that shell out.

use crate::error::ProcessError;
use crate::runner::{CommandOutput, CommandRunner, CommandSpec};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// A canned reaction to one command line.
#[derive(Debug, Clone)]
pub enum Scripted {
    Exit { code: i32, stdout: String, stderr: String, elapsed: Duration },
    NotFound,
    Timeout,
}

impl Scripted {
    #[must_use]
    pub fn ok(stdout: impl Into<String>, elapsed: Duration) -> Self {
        Self::Exit { code: 0, stdout: stdout.into(), stderr: String::new(), elapsed }
    }

    #[must_use]
    pub fn fail(code: i32, stderr: impl Into<String>) -> Self {
        Self::Exit { code, stdout: String::new(), stderr: stderr.into(), elapsed: Duration::ZERO }
    }
}

/// Replays scripted outputs keyed by the command line (`program arg1 arg2`).
///
/// Several scripts for the same line are consumed in order; the last one repeats.
/// Unknown command lines behave like a missing program.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Successful exit with `stdout`, taking one second.
    #[must_use]
    pub fn respond(self, command_line: &str, stdout: impl Into<String>) -> Self {
        self.script(command_line, Scripted::ok(stdout, Duration::from_secs(1)))
    }

    #[must_use]
    pub fn script(self, command_line: &str, scripted: Scripted) -> Self {
        self.scripts.lock().entry(command_line.to_owned()).or_default().push_back(scripted);
        self
    }

    /// Command lines executed so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn next_for(&self, command_line: &str) -> Option<Scripted> {
        let mut scripts = self.scripts.lock();
        let queue = scripts.get_mut(command_line)?;
        if queue.len() > 1 { queue.pop_front() } else { queue.front().cloned() }
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        let line = spec.to_string();
        self.calls.lock().push(line.clone());

        match self.next_for(&line) {
            Some(Scripted::Exit { code, stdout, stderr, elapsed }) => {
                Ok(CommandOutput { code: Some(code), stdout, stderr, elapsed })
            },
            Some(Scripted::Timeout) => Err(ProcessError::timeout(
                spec.program(),
                spec.time_limit().unwrap_or(Duration::ZERO),
            )),
            Some(Scripted::NotFound) | None => Err(ProcessError::not_found(spec.program())),
        }
    }
}
