//! The [`Archive`] handle: dated snapshot files under one root directory.

use crate::builder::ArchiveBuilder;
use crate::error::{ArchiveError, ArchiveErrorExt};
use crate::lint::{self, LintReport};
use crate::maintenance;
use crate::naming::SnapshotKind;
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

pub(crate) const TMP_MARKER: &str = ".lmarctmp.";

/// The internal shared state of an [`Archive`] instance.
#[derive(Debug)]
pub struct ArchiveInner {
    /// Canonicalized archive root.
    pub(crate) root: PathBuf,
    /// Whether existing snapshots may be replaced.
    pub(crate) overwrite: bool,
    pub(crate) tmp_counter: AtomicU64,
}

/// One snapshot file found in the archive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SnapshotEntry {
    pub date: NaiveDate,
    pub kind: SnapshotKind,
    /// Path relative to the archive root.
    pub path: PathBuf,
}

/// A cheaply cloneable handle to an archive directory.
///
/// Snapshots are write-once: a second write for the same kind and date fails with
/// [`ArchiveError::AlreadyExists`] unless the archive was opened with
/// `overwrite(true)`. Every write goes through a temp file, `fsync` and a rename so a
/// snapshot is either absent or complete.
///
/// ```rust
/// use chrono::NaiveDate;
/// use lmarc_archive::{Archive, ArchiveError, SnapshotKind};
///
/// #[tokio::main]
/// async fn main() -> Result<(), ArchiveError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     let archive = Archive::builder().root(tmp.path()).open().await?;
///     let day = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
///
///     archive.write(SnapshotKind::Models, day, "# Models\n").await?;
///     assert!(archive.write(SnapshotKind::Models, day, "# Again\n").await.is_err());
///     assert_eq!(archive.read(SnapshotKind::Models, day).await?, "# Models\n");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Archive {
    pub(crate) inner: Arc<ArchiveInner>,
}

impl Deref for Archive {
    type Target = ArchiveInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Archive {
    #[must_use = "The archive is not opened until you call .open()"]
    pub fn builder() -> ArchiveBuilder {
        ArchiveBuilder::new()
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn overwrites(&self) -> bool {
        self.inner.overwrite
    }

    /// Absolute path a snapshot of `kind` taken on `date` lives at.
    #[must_use]
    pub fn path_of(&self, kind: SnapshotKind, date: NaiveDate) -> PathBuf {
        self.root.join(kind.relative_path(date))
    }

    /// # Errors
    /// Returns [`ArchiveError::Io`] when the filesystem cannot be queried.
    pub async fn exists(&self, kind: SnapshotKind, date: NaiveDate) -> Result<bool, ArchiveError> {
        let path = self.path_of(kind, date);
        fs::try_exists(&path).await.context(format!("Failed to check {}", path.display()))
    }

    /// Stores a snapshot and returns its absolute path.
    ///
    /// # Errors
    /// * [`ArchiveError::AlreadyExists`] when the snapshot exists and overwriting is off.
    /// * [`ArchiveError::Io`] when the file cannot be written.
    pub async fn write(
        &self,
        kind: SnapshotKind,
        date: NaiveDate,
        contents: impl AsRef<[u8]>,
    ) -> Result<PathBuf, ArchiveError> {
        let target = self.path_of(kind, date);

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .context(format!("Failed to create {}", parent.display()))?;
        }

        let temp = unique_tmp_path(&target, &self.tmp_counter);
        let mut file = fs::OpenOptions::new()
            .create_new(true)
            .write(true)
            .open(&temp)
            .await
            .context(format!("Temp creation failed: {}", temp.display()))?;
        let flushed = fill(&mut file, contents.as_ref()).await;
        drop(file);
        discard_on_error(&temp, flushed).await?;

        let published = if self.overwrite {
            fs::rename(&temp, &target).await
        } else {
            // A hard link never replaces an existing target, unlike rename.
            let linked = fs::hard_link(&temp, &target).await;
            remove_quietly(&temp).await;
            linked
        };

        match published {
            Ok(()) => {},
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(ArchiveError::AlreadyExists {
                    message: format!(
                        "{} (snapshots are immutable; re-run with --force to replace it)",
                        target.display()
                    )
                    .into(),
                    context: None,
                });
            },
            Err(err) => {
                remove_quietly(&temp).await;
                return Err(ArchiveError::Io {
                    source: err,
                    context: Some(format!("Failed to publish {}", target.display()).into()),
                });
            },
        }

        if let Some(parent) = target.parent() {
            sync_dir(parent).await;
        }

        info!(kind = %kind, %date, path = %target.display(), "Snapshot written");
        Ok(target)
    }

    /// Serializes `value` as pretty JSON and stores it like [`Archive::write`].
    ///
    /// # Errors
    /// Everything [`Archive::write`] reports, plus [`ArchiveError::Json`].
    pub async fn write_json<T: Serialize + Sync>(
        &self,
        kind: SnapshotKind,
        date: NaiveDate,
        value: &T,
    ) -> Result<PathBuf, ArchiveError> {
        let json = serde_json::to_string_pretty(value)
            .context(format!("Failed to serialize {kind} snapshot"))?;
        self.write(kind, date, json).await
    }

    /// # Errors
    /// * [`ArchiveError::SnapshotNotFound`] when there is no such snapshot.
    /// * [`ArchiveError::Io`] when it cannot be read as UTF-8 text.
    pub async fn read(&self, kind: SnapshotKind, date: NaiveDate) -> Result<String, ArchiveError> {
        let path = self.path_of(kind, date);
        match fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(ArchiveError::SnapshotNotFound {
                message: path.display().to_string().into(),
                context: None,
            }),
            Err(err) => Err(ArchiveError::Io {
                source: err,
                context: Some(format!("Read failed: {}", path.display()).into()),
            }),
        }
    }

    /// # Errors
    /// Everything [`Archive::read`] reports, plus [`ArchiveError::Json`].
    pub async fn read_json<T: DeserializeOwned>(
        &self,
        kind: SnapshotKind,
        date: NaiveDate,
    ) -> Result<T, ArchiveError> {
        let text = self.read(kind, date).await?;
        serde_json::from_str(&text)
            .context(format!("Malformed {}", kind.relative_path(date).display()))
    }

    /// Snapshots in the archive, oldest first, optionally restricted to one kind.
    ///
    /// Files that do not follow the naming convention are skipped.
    ///
    /// # Errors
    /// Returns [`ArchiveError::Io`] when a directory cannot be listed.
    pub async fn list(&self, kind: Option<SnapshotKind>) -> Result<Vec<SnapshotEntry>, ArchiveError> {
        let mut directories = vec![None];
        directories.extend(
            SnapshotKind::ALL
                .into_iter()
                .filter(|k| kind.is_none_or(|wanted| wanted == *k))
                .filter_map(SnapshotKind::directory)
                .map(Some),
        );
        directories.dedup();

        let mut entries = Vec::new();
        for directory in directories {
            let dir_path = directory.map_or_else(|| self.root.clone(), |dir| self.root.join(dir));
            let mut reader = match fs::read_dir(&dir_path).await {
                Ok(reader) => reader,
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => {
                    return Err(ArchiveError::Io {
                        source: err,
                        context: Some(format!("Failed to list {}", dir_path.display()).into()),
                    });
                },
            };

            while let Some(item) =
                reader.next_entry().await.context(format!("Failed to list {}", dir_path.display()))?
            {
                let Some(name) = item.file_name().to_str().map(str::to_owned) else {
                    continue;
                };
                let relative = directory.map_or_else(|| PathBuf::from(&name), |dir| Path::new(dir).join(&name));
                let Some((found, date)) = SnapshotKind::parse(&relative) else {
                    continue;
                };
                if kind.is_none_or(|wanted| wanted == found) {
                    entries.push(SnapshotEntry { date, kind: found, path: relative });
                }
            }
        }

        entries.sort();
        debug!(count = entries.len(), "Listed snapshots");
        Ok(entries)
    }

    /// Date of the most recent snapshot of `kind`.
    ///
    /// # Errors
    /// Returns [`ArchiveError::Io`] when the archive cannot be listed.
    pub async fn latest(&self, kind: SnapshotKind) -> Result<Option<NaiveDate>, ArchiveError> {
        Ok(self.list(Some(kind)).await?.last().map(|entry| entry.date))
    }

    /// Date of the most recent snapshot of `kind` taken on or before `date`.
    ///
    /// # Errors
    /// Returns [`ArchiveError::Io`] when the archive cannot be listed.
    pub async fn latest_on_or_before(
        &self,
        kind: SnapshotKind,
        date: NaiveDate,
    ) -> Result<Option<NaiveDate>, ArchiveError> {
        Ok(self
            .list(Some(kind))
            .await?
            .into_iter()
            .rev()
            .map(|entry| entry.date)
            .find(|found| *found <= date))
    }

    /// Checks every file in the archive against the naming convention and the
    /// structural rules of its format.
    ///
    /// # Errors
    /// Returns [`ArchiveError::Internal`] when the blocking lint task panics.
    pub async fn lint(&self) -> Result<LintReport, ArchiveError> {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || lint::lint_tree(&root))
            .await
            .map_err(|err| ArchiveError::from(format!("Lint task failed: {err}")))
    }

    pub async fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.root).await;
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("snapshot");
    target.with_file_name(format!(".{file_name}{TMP_MARKER}{}.{counter}", std::process::id()))
}

async fn fill(file: &mut fs::File, contents: &[u8]) -> Result<(), ArchiveError> {
    file.write_all(contents).await.context("Write failed")?;
    file.flush().await.context("Write failed")?;
    file.sync_all().await.context("Hardware sync failed")
}

/// Removes the temp file when staging it failed, passing the result through.
async fn discard_on_error<T>(temp: &Path, result: Result<T, ArchiveError>) -> Result<T, ArchiveError> {
    if result.is_err() {
        remove_quietly(temp).await;
    }
    result
}

async fn remove_quietly(path: &Path) {
    if let Err(err) = fs::remove_file(path).await
        && err.kind() != ErrorKind::NotFound
    {
        warn!(path = %path.display(), error = %err, "Failed to remove temp file");
    }
}

async fn sync_dir(path: &Path) {
    match fs::File::open(path).await {
        Ok(dir) => {
            if let Err(err) = dir.sync_all().await {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_staging_removes_the_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let temp = dir.path().join(format!(".models-2025-06-14.md{TMP_MARKER}1.0"));
        fs::write(&temp, "partial").await.unwrap();

        let failed: Result<(), ArchiveError> = Err(ArchiveError::from("disk full".to_owned()));
        assert!(discard_on_error(&temp, failed).await.is_err());
        assert!(!temp.exists());
    }

    #[tokio::test]
    async fn successful_staging_keeps_the_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let temp = dir.path().join(format!(".models-2025-06-14.md{TMP_MARKER}1.1"));
        fs::write(&temp, "# Models\n").await.unwrap();

        discard_on_error(&temp, Ok(())).await.unwrap();
        assert!(temp.exists());
    }
}
