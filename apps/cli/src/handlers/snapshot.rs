use crate::app::{App, ensure_writable};
use crate::args::SnapshotTarget;
use anyhow::Result;
use chrono::NaiveDate;
use lmarc_archive::{Archive, SnapshotKind};
use lmarc_hardware::HardwareRecorder;
use lmarc_inventory::InventoryRecorder;
use tracing::error;

/// Records the requested snapshots for `date`.
///
/// With [`SnapshotTarget::All`] a failing half does not stop the other one.
///
/// # Errors
/// Returns the first failure: an existing snapshot, a missing tool or an I/O error.
pub async fn snapshot(app: &App, target: SnapshotTarget, date: NaiveDate, force: bool) -> Result<()> {
    let archive = app.writable(force).await?;

    match target {
        SnapshotTarget::Models => record_models(app, &archive, date).await,
        SnapshotTarget::Hardware => record_hardware(app, &archive, date).await,
        SnapshotTarget::All => {
            let models = record_models(app, &archive, date).await;
            let hardware = record_hardware(app, &archive, date).await;
            match (models, hardware) {
                (Err(first), Err(second)) => {
                    error!("Hardware snapshot failed: {second:#}");
                    Err(first)
                },
                (models, hardware) => models.and(hardware),
            }
        },
    }
}

async fn record_models(app: &App, archive: &Archive, date: NaiveDate) -> Result<()> {
    ensure_writable(archive, SnapshotKind::Models, date).await?;

    let inventory = InventoryRecorder::new(app.runner(), &app.config().ollama.binary).record(date).await?;
    let path = archive
        .write(SnapshotKind::Models, date, lmarc_inventory::render_markdown(&inventory))
        .await?;

    println!(
        "Saved model inventory ({} models, {:.2} GB) to {}",
        inventory.len(),
        inventory.total_size_gb(),
        path.display()
    );
    Ok(())
}

async fn record_hardware(app: &App, archive: &Archive, date: NaiveDate) -> Result<()> {
    ensure_writable(archive, SnapshotKind::Hardware, date).await?;

    let snapshot = HardwareRecorder::new(app.runner(), app.config().hardware.clone()).record(date).await?;
    let path = archive
        .write(SnapshotKind::Hardware, date, lmarc_hardware::render_markdown(&snapshot))
        .await?;

    println!("Saved hardware snapshot to {}", path.display());
    for note in &snapshot.notes {
        println!("  note: {note}");
    }
    Ok(())
}
