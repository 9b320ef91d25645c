use crate::app::App;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use lmarc_archive::{Archive, SnapshotKind};
use lmarc_inventory::{diff, parse_markdown};
use lmarc_kernel::domain::inventory::ModelInventory;

/// Prints one line per snapshot: date, kind and path relative to the root.
///
/// # Errors
/// Fails when the archive does not exist or cannot be listed.
pub async fn list(app: &App, kind: Option<SnapshotKind>) -> Result<()> {
    let archive = app.existing().await?;
    let entries = archive.list(kind).await?;

    if entries.is_empty() {
        println!("No snapshots in {}", archive.root().display());
        return Ok(());
    }
    for entry in &entries {
        println!("{}  {:<8}  {}", entry.date, entry.kind.label(), entry.path.display());
    }
    Ok(())
}

/// Prints every lint issue and returns whether the archive is clean.
///
/// # Errors
/// Fails when the archive does not exist.
pub async fn lint(app: &App) -> Result<bool> {
    let archive = app.existing().await?;
    let report = archive.lint().await?;

    for issue in &report.issues {
        println!("{issue}");
    }
    println!("Checked {} files, {} issue(s)", report.checked, report.issues.len());
    Ok(report.is_clean())
}

/// Prints the models added, removed and resized between two inventories.
///
/// # Errors
/// Fails when either inventory is missing or unreadable.
pub async fn compare(app: &App, from: NaiveDate, to: NaiveDate) -> Result<()> {
    let archive = app.existing().await?;
    let old = load_inventory(&archive, from).await?;
    let new = load_inventory(&archive, to).await?;
    print!("{}", diff(&old, &new).render());
    Ok(())
}

async fn load_inventory(archive: &Archive, date: NaiveDate) -> Result<ModelInventory> {
    let text = archive.read(SnapshotKind::Models, date).await?;
    parse_markdown(date, &text).with_context(|| format!("Cannot read the model inventory of {date}"))
}
