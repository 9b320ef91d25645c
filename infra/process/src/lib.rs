//! Runs the external commands the archive transcribes: `ollama list`, `ollama run`,
//! `nvidia-smi`, and any configured hardware probe.
//!
//! Every caller goes through the [`CommandRunner`] seam. [`TokioRunner`] spawns real
//! processes; the `testing` feature adds [`testing::ScriptedRunner`] which replays
//! canned outputs.
//!
//! ```rust,no_run
//! use lmarc_process::{CommandRunner, CommandSpec, TokioRunner};
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), lmarc_process::ProcessError> {
//! let spec = CommandSpec::new("ollama").arg("list").timeout(Duration::from_secs(30));
//! let output = TokioRunner.run(&spec).await?.ensure_success(&spec)?;
//! println!("{}", output.stdout);
//! # Ok(())
//! # }
//! ```

mod error;
mod runner;
#[cfg(feature = "testing")]
pub mod testing;

pub use crate::error::{ProcessError, ProcessErrorExt};
pub use crate::runner::{CommandOutput, CommandRunner, CommandSpec, TokioRunner, is_available};
