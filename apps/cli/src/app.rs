use crate::args::Cli;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use lmarc_archive::{Archive, SnapshotKind};
use lmarc_kernel::domain::config::ArchiveConfig;
use lmarc_process::TokioRunner;
use std::path::PathBuf;

/// Everything a command handler needs: the loaded configuration, the archive
/// location and the process runner.
#[derive(Debug, Clone)]
pub struct App {
    config: ArchiveConfig,
    root: PathBuf,
    runner: TokioRunner,
}

impl App {
    /// `--archive` wins over `archive.root`.
    #[must_use]
    pub fn new(cli: &Cli, config: ArchiveConfig) -> Self {
        let root = cli.archive.clone().unwrap_or_else(|| config.archive.root.clone());
        Self { config, root, runner: TokioRunner }
    }

    #[must_use]
    pub const fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    #[must_use]
    pub const fn runner(&self) -> TokioRunner {
        self.runner
    }

    /// Opens the archive for writing, creating the directory when needed.
    ///
    /// # Errors
    /// Fails when the directory cannot be created or resolved.
    pub async fn writable(&self, force: bool) -> Result<Archive> {
        Archive::builder()
            .root(&self.root)
            .overwrite(force || self.config.archive.overwrite)
            .open()
            .await
            .with_context(|| format!("Failed to open archive at {}", self.root.display()))
    }

    /// Opens an archive that must already exist.
    ///
    /// # Errors
    /// Fails when the directory does not exist.
    pub async fn existing(&self) -> Result<Archive> {
        Archive::builder()
            .root(&self.root)
            .create(false)
            .open()
            .await
            .with_context(|| format!("No archive at {}", self.root.display()))
    }
}

/// Refuses early, before any slow collection, when the snapshot would be rejected anyway.
///
/// # Errors
/// Fails when the snapshot exists and the archive does not overwrite.
pub async fn ensure_writable(archive: &Archive, kind: SnapshotKind, date: NaiveDate) -> Result<()> {
    if !archive.overwrites() && archive.exists(kind, date).await? {
        bail!(
            "{} already exists (snapshots are immutable; re-run with --force to replace it)",
            archive.path_of(kind, date).display()
        );
    }
    Ok(())
}
