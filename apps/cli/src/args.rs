//! # CLI Argument Definitions
//!
//! The `lmarc` command tree, parsed with `clap` derive.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use lmarc_archive::{SnapshotKind, parse_date};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lmarc")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Dated inventories, hardware snapshots and benchmarks of local models")]
pub struct Cli {
    /// Configuration file (defaults to ./lmarc.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Archive directory, overriding `archive.root`
    #[arg(long, global = true, value_name = "DIR")]
    pub archive: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Record today's model inventory and/or hardware snapshot
    Snapshot {
        #[arg(value_enum)]
        target: SnapshotTarget,
        #[command(flatten)]
        when: DateArg,
        /// Replace a snapshot that already exists
        #[arg(long)]
        force: bool,
    },
    /// Benchmark installed models
    Bench {
        #[command(subcommand)]
        action: BenchAction,
    },
    /// Compose the markdown report from saved benchmark results
    Report {
        #[command(flatten)]
        when: DateArg,
        /// Replace a report that already exists
        #[arg(long)]
        force: bool,
    },
    /// List snapshots in the archive, oldest first
    List {
        /// Only this kind (models, hardware, results, report)
        kind: Option<SnapshotKind>,
    },
    /// Check file names and document structure across the archive
    Lint {},
    /// Show models added, removed or resized between two inventories
    Compare {
        /// Date of the older inventory (YYYY-MM-DD)
        #[arg(value_parser = date_arg)]
        from: NaiveDate,
        /// Date of the newer inventory (YYYY-MM-DD)
        #[arg(value_parser = date_arg)]
        to: NaiveDate,
    },
}

#[derive(Debug, Subcommand)]
pub enum BenchAction {
    /// Run the standard prompts against models and save the results
    Run {
        /// Benchmark only these models (repeatable); all installed models by default
        #[arg(short, long = "model", value_name = "MODEL")]
        models: Vec<String>,
        #[command(flatten)]
        when: DateArg,
        /// Replace results (and report) that already exist
        #[arg(long)]
        force: bool,
        /// Also compose the markdown report
        #[arg(long)]
        report: bool,
    },
    /// Print the console summary of saved results
    Summary {
        #[command(flatten)]
        when: DateArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SnapshotTarget {
    Models,
    Hardware,
    All,
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct DateArg {
    /// Snapshot date (YYYY-MM-DD), today by default
    #[arg(long, value_parser = date_arg)]
    pub date: Option<NaiveDate>,
}

impl DateArg {
    #[must_use]
    pub fn or_today(self) -> NaiveDate {
        self.date.unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("'{value}' is not a date in YYYY-MM-DD form"))
}
