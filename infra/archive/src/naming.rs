//! File naming convention of the archive.
//!
//! | Kind | Path |
//! |------|------|
//! | [`SnapshotKind::Models`] | `models-YYYY-MM-DD.md` |
//! | [`SnapshotKind::Hardware`] | `hardware-specs/hardware-YYYY-MM-DD.md` |
//! | [`SnapshotKind::BenchmarkResults`] | `benchmark-results-YYYY-MM-DD.json` |
//! | [`SnapshotKind::BenchmarkReport`] | `benchmark-report-YYYY-MM-DD.md` |

use chrono::NaiveDate;
use lmarc_domain::constants::{
    DATE_FORMAT, HARDWARE_DIR, HARDWARE_PREFIX, JSON_EXT, MARKDOWN_EXT, MODELS_PREFIX,
    REPORT_PREFIX, RESULTS_PREFIX,
};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SnapshotKind {
    Models,
    Hardware,
    BenchmarkResults,
    BenchmarkReport,
}

impl SnapshotKind {
    pub const ALL: [Self; 4] =
        [Self::Models, Self::Hardware, Self::BenchmarkResults, Self::BenchmarkReport];

    const fn prefix(self) -> &'static str {
        match self {
            Self::Models => MODELS_PREFIX,
            Self::Hardware => HARDWARE_PREFIX,
            Self::BenchmarkResults => RESULTS_PREFIX,
            Self::BenchmarkReport => REPORT_PREFIX,
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::BenchmarkResults => JSON_EXT,
            Self::Models | Self::Hardware | Self::BenchmarkReport => MARKDOWN_EXT,
        }
    }

    /// Sub-directory of the archive root holding this kind, if any.
    #[must_use]
    pub const fn directory(self) -> Option<&'static str> {
        match self {
            Self::Hardware => Some(HARDWARE_DIR),
            Self::Models | Self::BenchmarkResults | Self::BenchmarkReport => None,
        }
    }

    /// Short name used on the command line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Models => "models",
            Self::Hardware => "hardware",
            Self::BenchmarkResults => "results",
            Self::BenchmarkReport => "report",
        }
    }

    #[must_use]
    pub fn file_name(self, date: NaiveDate) -> String {
        format!("{}{}.{}", self.prefix(), date.format(DATE_FORMAT), self.extension())
    }

    /// Path relative to the archive root.
    #[must_use]
    pub fn relative_path(self, date: NaiveDate) -> PathBuf {
        let name = self.file_name(date);
        self.directory().map_or_else(|| PathBuf::from(&name), |dir| Path::new(dir).join(&name))
    }

    /// Recognizes a bare file name, ignoring where it lives.
    #[must_use]
    pub fn parse_file_name(name: &str) -> Option<(Self, NaiveDate)> {
        Self::ALL.into_iter().find_map(|kind| {
            let stem = name.strip_prefix(kind.prefix())?.strip_suffix(kind.extension())?;
            let date = stem.strip_suffix('.')?;
            parse_date(date).map(|date| (kind, date))
        })
    }

    /// Recognizes a path relative to the archive root, including its directory.
    #[must_use]
    pub fn parse(relative: &Path) -> Option<(Self, NaiveDate)> {
        let mut parts = relative.components().filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        });
        let (directory, file) = match (parts.next(), parts.next(), parts.next()) {
            (Some(file), None, None) => (None, file),
            (Some(dir), Some(file), None) => (Some(dir), file),
            _ => return None,
        };

        Self::parse_file_name(file).filter(|(kind, _)| kind.directory() == directory)
    }
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SnapshotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown snapshot kind '{s}' (expected models, hardware, results or report)"))
    }
}

/// Strict `YYYY-MM-DD`: zero padded and a real calendar day.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == value).then_some(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
    }

    #[test]
    fn layout_matches_convention() {
        assert_eq!(SnapshotKind::Models.relative_path(day()), Path::new("models-2025-06-14.md"));
        assert_eq!(
            SnapshotKind::Hardware.relative_path(day()),
            Path::new("hardware-specs/hardware-2025-06-14.md")
        );
        assert_eq!(
            SnapshotKind::BenchmarkResults.relative_path(day()),
            Path::new("benchmark-results-2025-06-14.json")
        );
        assert_eq!(
            SnapshotKind::BenchmarkReport.relative_path(day()),
            Path::new("benchmark-report-2025-06-14.md")
        );
    }

    #[test]
    fn parse_checks_directory() {
        assert_eq!(
            SnapshotKind::parse(Path::new("hardware-specs/hardware-2025-06-14.md")),
            Some((SnapshotKind::Hardware, day()))
        );
        assert_eq!(SnapshotKind::parse(Path::new("hardware-2025-06-14.md")), None);
        assert_eq!(SnapshotKind::parse(Path::new("hardware-specs/models-2025-06-14.md")), None);
        assert_eq!(SnapshotKind::parse(Path::new("a/b/models-2025-06-14.md")), None);
    }

    #[test]
    fn results_and_report_prefixes_do_not_collide() {
        assert_eq!(
            SnapshotKind::parse_file_name("benchmark-results-2025-06-14.json"),
            Some((SnapshotKind::BenchmarkResults, day()))
        );
        assert_eq!(
            SnapshotKind::parse_file_name("benchmark-report-2025-06-14.md"),
            Some((SnapshotKind::BenchmarkReport, day()))
        );
        assert_eq!(SnapshotKind::parse_file_name("benchmark-results-2025-06-14.md"), None);
    }

    #[test]
    fn dates_must_be_strict() {
        assert!(parse_date("2025-06-14").is_some());
        assert!(parse_date("2025-6-14").is_none());
        assert!(parse_date("2025-02-30").is_none());
        assert!(parse_date("14-06-2025").is_none());
        assert_eq!(SnapshotKind::parse_file_name("models-2025-6-14.md"), None);
        assert_eq!(SnapshotKind::parse_file_name("models-latest.md"), None);
    }

    #[test]
    fn kinds_parse_from_labels() {
        assert_eq!("Hardware".parse::<SnapshotKind>(), Ok(SnapshotKind::Hardware));
        assert_eq!("results".parse::<SnapshotKind>(), Ok(SnapshotKind::BenchmarkResults));
        assert!("gpu".parse::<SnapshotKind>().is_err());
    }
}
