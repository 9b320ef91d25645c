//! Archive hygiene checks: naming convention and well-formed contents.

use crate::naming::SnapshotKind;
use lmarc_domain::bench::BenchmarkRun;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files that may live in an archive without following the snapshot convention.
const ALLOWED_FILES: &[&str] = &["README.md", "lmarc.toml"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintIssue {
    /// Path relative to the archive root.
    pub path: PathBuf,
    pub problem: String,
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.problem)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    /// Number of snapshot files inspected.
    pub checked: usize,
    pub issues: Vec<LintIssue>,
}

impl LintReport {
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, path: &Path, problem: impl Into<String>) {
        self.issues.push(LintIssue { path: path.to_path_buf(), problem: problem.into() });
    }
}

pub(crate) fn lint_tree(root: &Path) -> LintReport {
    let mut report = LintReport::default();

    let entries = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name().to_str()));

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().map_or_else(PathBuf::new, Path::to_path_buf);
                report.push(strip(root, &path), format!("unreadable: {err}"));
                continue;
            },
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = strip(root, entry.path());
        let name = entry.file_name().to_string_lossy();
        if ALLOWED_FILES.contains(&name.as_ref()) && relative.parent() == Some(Path::new("")) {
            continue;
        }

        let Some((kind, _)) = SnapshotKind::parse(relative) else {
            report.push(relative, naming_problem(relative));
            continue;
        };

        report.checked += 1;
        let contents = match std::fs::read_to_string(entry.path()) {
            Ok(contents) => contents,
            Err(err) => {
                report.push(relative, format!("unreadable: {err}"));
                continue;
            },
        };

        let problems = match kind {
            SnapshotKind::BenchmarkResults => check_results(&contents),
            SnapshotKind::Models | SnapshotKind::Hardware | SnapshotKind::BenchmarkReport => {
                check_markdown(&contents)
            },
        };
        for problem in problems {
            report.push(relative, problem);
        }
    }

    report
}

fn naming_problem(relative: &Path) -> String {
    let name = relative.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    match SnapshotKind::parse_file_name(name) {
        Some((kind, _)) => match kind.directory() {
            Some(dir) => format!("{kind} snapshots belong in {dir}/"),
            None => format!("{kind} snapshots belong in the archive root"),
        },
        None => "does not match any snapshot naming pattern \
                 (models-, hardware-specs/hardware-, benchmark-results-, benchmark-report- + YYYY-MM-DD)"
            .to_owned(),
    }
}

fn check_results(contents: &str) -> Vec<String> {
    match serde_json::from_str::<BenchmarkRun>(contents) {
        Ok(_) => Vec::new(),
        Err(err) => vec![format!("not a valid benchmark results file: {err}")],
    }
}

/// Structural markdown checks; returns one message per problem.
#[must_use]
pub fn check_markdown(text: &str) -> Vec<String> {
    let mut problems = Vec::new();

    let Some(first) = text.lines().find(|line| !line.trim().is_empty()) else {
        problems.push("empty document".to_owned());
        return problems;
    };
    if !first.starts_with("# ") {
        problems.push("document must start with a level-one heading".to_owned());
    }

    let mut in_fence = false;
    let mut fence_opened_at = 0;
    let mut table: Option<Table> = None;

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            fence_opened_at = number;
            if let Some(done) = table.take() {
                problems.extend(done.problems);
            }
            continue;
        }
        if in_fence {
            continue;
        }

        if trimmed.starts_with('|') {
            table.get_or_insert_with(|| Table::new(number, trimmed)).row(number, trimmed);
        } else if let Some(done) = table.take() {
            problems.extend(done.problems);
        }
    }

    if let Some(done) = table {
        problems.extend(done.problems);
    }
    if in_fence {
        problems.push(format!("code fence opened on line {fence_opened_at} is never closed"));
    }

    problems
}

#[derive(Debug)]
struct Table {
    header_line: usize,
    columns: usize,
    rows: usize,
    problems: Vec<String>,
}

impl Table {
    fn new(line: usize, header: &str) -> Self {
        Self { header_line: line, columns: cells(header).len(), rows: 0, problems: Vec::new() }
    }

    fn row(&mut self, line: usize, text: &str) {
        self.rows += 1;
        let row = cells(text);

        if self.rows == 2 && !row.iter().all(|cell| is_separator(cell)) {
            self.problems.push(format!(
                "table starting on line {} has no separator row",
                self.header_line
            ));
        }
        if row.len() != self.columns {
            self.problems.push(format!(
                "table row on line {line} has {} columns, expected {}",
                row.len(),
                self.columns
            ));
        }
    }
}

fn cells(row: &str) -> Vec<String> {
    let inner = row.trim();
    let inner = inner.strip_prefix('|').unwrap_or(inner);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for ch in inner.chars() {
        match ch {
            '\\' if !escaped => {
                escaped = true;
                current.push(ch);
                continue;
            },
            '|' if !escaped => cells.push(std::mem::take(&mut current).trim().to_owned()),
            _ => current.push(ch),
        }
        escaped = false;
    }
    cells.push(current.trim().to_owned());
    cells
}

fn is_separator(cell: &str) -> bool {
    let dashes = cell.trim_start_matches(':').trim_end_matches(':');
    !dashes.is_empty() && dashes.chars().all(|c| c == '-')
}

fn is_hidden(name: Option<&str>) -> bool {
    name.is_some_and(|name| name.starts_with('.'))
}

fn strip<'a>(root: &Path, path: &'a Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}
