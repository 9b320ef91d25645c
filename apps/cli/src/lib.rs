//! # lmarc
//!
//! Command line front of the local model archive. Every subcommand is a thin handler
//! over the feature crates; results and reports go to stdout, logs to stderr.
#![allow(clippy::print_stderr, clippy::print_stdout)]

pub mod app;
pub mod args;
pub mod handlers;

pub use crate::app::App;
pub use crate::args::Cli;

use crate::args::{AppCommands, BenchAction};
use crate::handlers::{archive, bench, report, snapshot};
use anyhow::Result;
use std::process::ExitCode;

/// Runs one parsed command.
///
/// # Errors
/// Whatever the handler reports.
pub async fn dispatch(app: &App, command: AppCommands) -> Result<ExitCode> {
    match command {
        AppCommands::Snapshot { target, when, force } => {
            snapshot::snapshot(app, target, when.or_today(), force).await?;
        },
        AppCommands::Bench { action } => match action {
            BenchAction::Run { models, when, force, report } => {
                bench::run(app, models, when.or_today(), force, report).await?;
            },
            BenchAction::Summary { when } => bench::summary(app, when.or_today()).await?,
        },
        AppCommands::Report { when, force } => report::report(app, when.or_today(), force).await?,
        AppCommands::List { kind } => archive::list(app, kind).await?,
        AppCommands::Lint {} => {
            if !archive::lint(app).await? {
                return Ok(ExitCode::FAILURE);
            }
        },
        AppCommands::Compare { from, to } => archive::compare(app, from, to).await?,
    }

    Ok(ExitCode::SUCCESS)
}
