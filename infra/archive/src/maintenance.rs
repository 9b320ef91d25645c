use crate::engine::TMP_MARKER;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{error, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Temp files younger than this may belong to a write still in progress.
const STALE_AFTER: Duration = Duration::from_secs(300);

pub(crate) async fn purge_tmp(root: &Path) {
    let root = root.to_path_buf();
    let now = SystemTime::now();

    match tokio::task::spawn_blocking(move || remove_stale(&root, now, STALE_AFTER)).await {
        Ok((removed, failed)) if removed > 0 || failed > 0 => {
            info!(removed, failed, "Cleaned up interrupted snapshot writes");
        },
        Err(e) => {
            error!(error = %e, "Temp file cleanup task panicked");
        },
        _ => {},
    }
}

pub(crate) fn remove_stale(root: &Path, now: SystemTime, threshold: Duration) -> (usize, usize) {
    let mut removed = 0;
    let mut failed = 0;

    WalkDir::new(root)
        .max_depth(2)
        .into_iter()
        .flatten()
        .filter(|entry| is_tmp(entry) && is_stale(entry, now, threshold))
        .for_each(|entry| match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Failed to remove temp file");
                failed += 1;
            },
        });

    (removed, failed)
}

fn is_tmp(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER))
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn only_stale_temp_files_are_removed() {
        let tmp = tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join("hardware-specs")).unwrap();
        fs::write(root.join(".models-2025-06-14.md.lmarctmp.1.1"), "partial").unwrap();
        fs::write(root.join("hardware-specs/.hardware-2025-06-14.md.lmarctmp.1.2"), "x").unwrap();
        fs::write(root.join("models-2025-06-13.md"), "# Models\n").unwrap();

        let (removed, failed) = remove_stale(root, SystemTime::now(), STALE_AFTER);
        assert_eq!((removed, failed), (0, 0), "fresh temp files belong to live writers");

        let later = SystemTime::now() + Duration::from_secs(3600);
        let (removed, failed) = remove_stale(root, later, STALE_AFTER);
        assert_eq!((removed, failed), (2, 0));
        assert!(root.join("models-2025-06-13.md").exists());
        assert!(root.join("hardware-specs").is_dir());
    }
}
