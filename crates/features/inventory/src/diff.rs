//! Differences between two inventory snapshots.

use chrono::NaiveDate;
use fxhash::FxHashMap;
use lmarc_domain::inventory::{ModelEntry, ModelInventory};
use std::fmt::Write as _;

/// Sizes are recorded to two decimals, so changes are counted in hundredths of a GB.
fn hundredths(size_gb: f64) -> f64 {
    (size_gb * 100.0).round()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resized {
    pub name: String,
    pub before_gb: f64,
    pub after_gb: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryDiff {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub added: Vec<ModelEntry>,
    pub removed: Vec<ModelEntry>,
    pub resized: Vec<Resized>,
}

impl InventoryDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.resized.is_empty()
    }

    /// Plain-text summary for the terminal.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Models {} -> {}", self.from, self.to);
        if self.is_empty() {
            out.push_str("  no changes\n");
            return out;
        }

        for entry in &self.added {
            let _ = writeln!(out, "  + {}{}", entry.name, size_suffix(entry.size_gb));
        }
        for entry in &self.removed {
            let _ = writeln!(out, "  - {}{}", entry.name, size_suffix(entry.size_gb));
        }
        for change in &self.resized {
            let _ = writeln!(
                out,
                "  ~ {} ({:.2} GB -> {:.2} GB)",
                change.name, change.before_gb, change.after_gb
            );
        }
        out
    }
}

/// Models added, removed and resized going from `old` to `new`, in listing order.
#[must_use]
pub fn diff(old: &ModelInventory, new: &ModelInventory) -> InventoryDiff {
    let before: FxHashMap<&str, &ModelEntry> =
        old.entries.iter().map(|entry| (entry.name.as_str(), entry)).collect();
    let after: FxHashMap<&str, &ModelEntry> =
        new.entries.iter().map(|entry| (entry.name.as_str(), entry)).collect();

    let added = new
        .entries
        .iter()
        .filter(|entry| !before.contains_key(entry.name.as_str()))
        .cloned()
        .collect();
    let removed = old
        .entries
        .iter()
        .filter(|entry| !after.contains_key(entry.name.as_str()))
        .cloned()
        .collect();
    let resized = new
        .entries
        .iter()
        .filter_map(|entry| {
            let previous = before.get(entry.name.as_str())?;
            let (before_gb, after_gb) = (previous.size_gb?, entry.size_gb?);
            ((hundredths(after_gb) - hundredths(before_gb)).abs() >= 1.0).then(|| Resized {
                name: entry.name.clone(),
                before_gb,
                after_gb,
            })
        })
        .collect();

    InventoryDiff { from: old.taken_on, to: new.taken_on, added, removed, resized }
}

fn size_suffix(size_gb: Option<f64>) -> String {
    size_gb.map(|gb| format!(" ({gb:.2} GB)")).unwrap_or_default()
}
