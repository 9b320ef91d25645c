use crate::engine::{Archive, ArchiveInner};
use crate::error::{ArchiveError, ArchiveErrorExt};
use private::Sealed;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tokio::fs;
use tracing::info;

#[derive(Debug, Clone)]
struct ArchiveOptions {
    create: bool,
    overwrite: bool,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self { create: true, overwrite: false }
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct ArchiveBuilder<S: Sealed = NoRoot> {
    state: S,
    options: ArchiveOptions,
}

#[allow(private_bounds)]
impl<S: Sealed> ArchiveBuilder<S> {
    #[must_use = "Sets whether a missing archive root is created"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.options.create = enable;
        self
    }

    #[must_use = "Sets whether existing snapshots may be replaced"]
    pub const fn overwrite(mut self, enable: bool) -> Self {
        self.options.overwrite = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> ArchiveBuilder<N> {
        ArchiveBuilder { state, options: self.options }
    }
}

impl ArchiveBuilder<NoRoot> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the archive root directory"]
    pub fn root(self, path: impl Into<PathBuf>) -> ArchiveBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }
}

impl ArchiveBuilder<WithRoot> {
    /// Opens the archive.
    ///
    /// Creates the root when `create(true)` (the default), resolves it to a canonical
    /// path and removes temp files left behind by interrupted writes.
    ///
    /// # Errors
    /// Returns [`ArchiveError::Io`] when the root does not exist and `create` is off,
    /// or when it cannot be created or resolved.
    pub async fn open(self) -> Result<Archive, ArchiveError> {
        let root = &self.state.0;

        if self.options.create {
            fs::create_dir_all(root)
                .await
                .context(format!("Failed to create archive root: {}", root.display()))?;
        }

        let canonical = fs::canonicalize(root)
            .await
            .context(format!("Failed to resolve archive root: {}", root.display()))?;
        info!(path = %canonical.display(), overwrite = self.options.overwrite, "Archive opened");

        let archive = Archive {
            inner: Arc::new(ArchiveInner {
                root: canonical,
                overwrite: self.options.overwrite,
                tmp_counter: AtomicU64::new(1),
            }),
        };

        archive.purge_tmp().await;

        Ok(archive)
    }
}
