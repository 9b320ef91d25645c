//! Markdown form of a [`ModelInventory`] and reading it back.

use crate::error::InventoryError;
use chrono::NaiveDate;
use lmarc_domain::constants::DATE_FORMAT;
use lmarc_domain::inventory::{ModelEntry, ModelInventory};
use std::fmt::Write as _;

const TABLE_HEADER: &str = "| Model | Size (GB) | Purpose |";
const RAW_HEADING: &str = "## Raw listing";
const MISSING: &str = "-";

/// Renders the snapshot file contents.
#[must_use]
pub fn render_markdown(inventory: &ModelInventory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Model Inventory: {}", inventory.taken_on.format(DATE_FORMAT));
    out.push('\n');

    if inventory.is_empty() {
        out.push_str("No models installed.\n\n");
    } else {
        let _ = writeln!(out, "{TABLE_HEADER}");
        out.push_str("|-------|----------:|---------|\n");
        for entry in &inventory.entries {
            let size = entry.size_gb.map_or_else(|| MISSING.to_owned(), |gb| format!("{gb:.2}"));
            let purpose = entry.purpose.as_deref().unwrap_or(MISSING);
            let _ = writeln!(out, "| {} | {size} | {} |", escape(&entry.name), escape(purpose));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "- Models installed: {}", inventory.len());
    let _ = writeln!(out, "- Total size: {:.2} GB", inventory.total_size_gb());

    if !inventory.raw_listing.trim().is_empty() {
        let _ = write!(out, "\n{RAW_HEADING}\n\n```text\n{}\n```\n", inventory.raw_listing.trim_end());
    }

    out
}

/// Reads the model table of a rendered snapshot.
///
/// # Errors
/// Returns [`InventoryError::Snapshot`] when the text has neither a model table nor
/// the "No models installed" marker.
pub fn parse_markdown(taken_on: NaiveDate, text: &str) -> Result<ModelInventory, InventoryError> {
    let mut lines = text.lines().map(str::trim);

    if !text.lines().any(|line| line.trim() == TABLE_HEADER) {
        if text.contains("No models installed.") {
            return Ok(ModelInventory::new(taken_on, Vec::new()));
        }
        return Err(InventoryError::Snapshot {
            message: format!("no `{TABLE_HEADER}` table found").into(),
            context: None,
        });
    }

    lines.by_ref().find(|line| *line == TABLE_HEADER);
    let entries = lines
        .skip(1)
        .take_while(|line| line.starts_with('|'))
        .filter_map(parse_row)
        .collect();

    let mut inventory = ModelInventory::new(taken_on, entries);
    inventory.raw_listing = raw_listing(text).unwrap_or_default();
    Ok(inventory)
}

fn parse_row(line: &str) -> Option<ModelEntry> {
    let inner = line.strip_prefix('|')?.strip_suffix('|')?;
    let cells: Vec<String> = split_cells(inner);
    let [name, size, purpose] = cells.as_slice() else {
        return None;
    };

    let mut entry = ModelEntry::new(name.as_str());
    entry.size_gb = size.parse().ok();
    entry.purpose = (purpose != MISSING && !purpose.is_empty()).then(|| purpose.clone());
    Some(entry)
}

fn split_cells(inner: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                current.push('|');
            },
            '|' => cells.push(std::mem::take(&mut current).trim().to_owned()),
            _ => current.push(ch),
        }
    }
    cells.push(current.trim().to_owned());
    cells
}

fn raw_listing(text: &str) -> Option<String> {
    let (_, after) = text.split_once(RAW_HEADING)?;
    let (_, body) = after.split_once("```text\n")?;
    let (listing, _) = body.split_once("\n```")?;
    Some(listing.to_owned())
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}
