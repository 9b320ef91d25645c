use crate::app::{App, ensure_writable};
use anyhow::Result;
use chrono::NaiveDate;
use lmarc_archive::{Archive, SnapshotKind};
use lmarc_inventory::parse_markdown;
use lmarc_kernel::domain::bench::BenchmarkRun;
use lmarc_kernel::domain::inventory::ModelInventory;
use lmarc_report::render_report;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Composes the report for the results saved on `date`.
///
/// # Errors
/// Fails when the report exists, the results are missing or malformed, or the
/// report cannot be written.
pub async fn report(app: &App, date: NaiveDate, force: bool) -> Result<()> {
    let archive = app.writable(force).await?;
    ensure_writable(&archive, SnapshotKind::BenchmarkReport, date).await?;

    let run: BenchmarkRun = archive.read_json(SnapshotKind::BenchmarkResults, date).await?;
    compose(&archive, &run, date).await?;
    Ok(())
}

/// Renders `run` with model sizes from the closest inventory and saves it.
///
/// # Errors
/// Fails when the report cannot be written.
pub async fn compose(archive: &Archive, run: &BenchmarkRun, date: NaiveDate) -> Result<PathBuf> {
    let inventory = inventory_for(archive, date).await?;
    let path = archive
        .write(SnapshotKind::BenchmarkReport, date, render_report(run, inventory.as_ref()))
        .await?;
    println!("Report saved to {}", path.display());
    Ok(path)
}

/// The inventory taken on `date`, or the latest one before it.
async fn inventory_for(archive: &Archive, date: NaiveDate) -> Result<Option<ModelInventory>> {
    let Some(taken_on) = archive.latest_on_or_before(SnapshotKind::Models, date).await? else {
        warn!(%date, "No model inventory on or before this date; sizes are left blank");
        return Ok(None);
    };

    let text = archive.read(SnapshotKind::Models, taken_on).await?;
    match parse_markdown(taken_on, &text) {
        Ok(inventory) => {
            debug!(%taken_on, models = inventory.len(), "Using model inventory for sizes");
            Ok(Some(inventory))
        },
        Err(err) => {
            warn!(%taken_on, %err, "Unreadable model inventory; sizes are left blank");
            Ok(None)
        },
    }
}
