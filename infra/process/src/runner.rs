use crate::error::{ProcessError, ProcessErrorExt};
use std::fmt;
use std::future::Future;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, warn};

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// A program, its arguments and an optional timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandSpec {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), timeout: None }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub const fn time_limit(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Program and arguments joined by single spaces, without shell quoting.
impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl CommandOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Turns a non-zero exit into [`ProcessError::Failed`] carrying stderr.
    ///
    /// # Errors
    /// Returns [`ProcessError::Failed`] when the exit code is not zero.
    pub fn ensure_success(self, spec: &CommandSpec) -> Result<Self, ProcessError> {
        if self.success() {
            return Ok(self);
        }

        let status = self.code.map_or_else(|| "signal".to_owned(), |code| code.to_string());
        let stderr = self.stderr.trim();
        let detail = if stderr.is_empty() { "no stderr output" } else { stderr };
        Err(ProcessError::Failed {
            message: format!("`{spec}` exited with {status}: {detail}").into(),
            context: None,
        })
    }
}

/// Executes external commands.
///
/// Recorders and the benchmark are generic over this trait so tests can replay
/// canned output instead of spawning real tools.
pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion and captures its output.
    ///
    /// A non-zero exit is **not** an error at this level; see
    /// [`CommandOutput::ensure_success`].
    fn run(
        &self,
        spec: &CommandSpec,
    ) -> impl Future<Output = Result<CommandOutput, ProcessError>> + Send;
}

impl<R: CommandRunner> CommandRunner for &R {
    fn run(
        &self,
        spec: &CommandSpec,
    ) -> impl Future<Output = Result<CommandOutput, ProcessError>> + Send {
        (**self).run(spec)
    }
}

/// Spawns real processes on the Tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRunner;

impl CommandRunner for TokioRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
        let mut command = Command::new(spec.program());
        command
            .args(spec.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(command = %spec, "Spawning process");
        let started = Instant::now();

        let child = command.spawn().map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ProcessError::not_found(spec.program())
            } else {
                ProcessError::Io {
                    source: err,
                    context: Some(format!("Failed to spawn {}", spec.program()).into()),
                }
            }
        })?;

        // Dropping the pending future drops the child, which kills it.
        let waited = match spec.time_limit() {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output()).await.map_err(|_| {
                warn!(command = %spec, ?limit, "Process timed out and was killed");
                ProcessError::timeout(spec.program(), limit)
            })?,
            None => child.wait_with_output().await,
        };
        let output = waited.context(format!("Failed to collect output of {}", spec.program()))?;

        let elapsed = started.elapsed();
        debug!(command = %spec, code = ?output.status.code(), ?elapsed, "Process finished");

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed,
        })
    }
}

/// Checks whether `<program> --version` runs and exits successfully.
pub async fn is_available<R: CommandRunner>(runner: &R, program: &str) -> bool {
    let spec = CommandSpec::new(program).arg("--version").timeout(PROBE_TIMEOUT);
    match runner.run(&spec).await {
        Ok(output) => output.success(),
        Err(err) => {
            debug!(program, error = %err, "Availability probe failed");
            false
        },
    }
}
