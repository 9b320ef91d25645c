//! Dated snapshot archive for local model notes.
//!
//! An archive is a plain directory that stays readable without this crate:
//!
//! ```text
//! ai-notes/
//! ├── models-2025-06-14.md
//! ├── hardware-specs/
//! │   └── hardware-2025-06-14.md
//! ├── benchmark-results-2025-06-14.json
//! └── benchmark-report-2025-06-14.md
//! ```
//!
//! # Core Features
//!
//! - **Write-once snapshots**: a snapshot for a kind and date is never replaced unless
//!   the archive is opened with `overwrite(true)`.
//! - **Atomic writes**: temp file + `fsync` + link/rename, so readers never see half a file.
//! - **Self-healing**: stale temp files of interrupted writes are removed on open.
//! - **Linting**: naming and structural checks over the whole tree.

mod builder;
mod engine;
mod error;
mod lint;
mod maintenance;
pub mod naming;

pub use builder::ArchiveBuilder;
pub use engine::{Archive, SnapshotEntry};
pub use error::{ArchiveError, ArchiveErrorExt};
pub use lint::{LintIssue, LintReport, check_markdown};
pub use naming::{SnapshotKind, parse_date};
