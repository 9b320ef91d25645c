use crate::app::{App, ensure_writable};
use crate::handlers::report::compose;
use anyhow::Result;
use chrono::NaiveDate;
use lmarc_archive::SnapshotKind;
use lmarc_bench::{BenchError, BenchSettings, Benchmark, assemble};
use lmarc_inventory::InventoryRecorder;
use lmarc_kernel::domain::bench::BenchmarkRun;
use lmarc_report::render_summary;
use tracing::{info, warn};

/// Benchmarks `models` (all installed models when empty) and saves the results.
///
/// Ctrl-C stops the run; models finished before it are still saved.
///
/// # Errors
/// Fails before benchmarking when the results already exist, Ollama is missing or
/// no models are installed; afterwards only when saving fails.
pub async fn run(app: &App, models: Vec<String>, date: NaiveDate, force: bool, report: bool) -> Result<()> {
    let archive = app.writable(force).await?;
    ensure_writable(&archive, SnapshotKind::BenchmarkResults, date).await?;
    if report {
        ensure_writable(&archive, SnapshotKind::BenchmarkReport, date).await?;
    }

    let mut bench = Benchmark::new(app.runner(), BenchSettings::from_config(app.config()));
    bench.ensure_available().await?;

    let models = if models.is_empty() {
        InventoryRecorder::new(app.runner(), &app.config().ollama.binary).model_names().await?
    } else {
        models
    };
    if models.is_empty() {
        return Err(BenchError::NoModels {
            message: "no models installed; pull one with `ollama pull <model>`".into(),
            context: None,
        }
        .into());
    }

    let outcome = bench.run(&models, ctrl_c()).await;
    if outcome.results.is_empty() {
        println!("Benchmark interrupted before any model finished; nothing saved.");
        return Ok(());
    }

    let run = assemble(outcome.results, bench.settings());
    let path = archive.write_json(SnapshotKind::BenchmarkResults, date, &run).await?;

    print!("{}", render_summary(&run));
    if outcome.interrupted {
        println!("Interrupted: results of {} of {} models kept.", run.results.len(), models.len());
    }
    println!("Results saved to {}", path.display());

    if report {
        compose(&archive, &run, date).await?;
    }
    Ok(())
}

/// Prints the console summary of the results saved for `date`.
///
/// # Errors
/// Fails when there are no results for that date or they cannot be parsed.
pub async fn summary(app: &App, date: NaiveDate) -> Result<()> {
    let archive = app.existing().await?;
    let run: BenchmarkRun = archive.read_json(SnapshotKind::BenchmarkResults, date).await?;
    print!("{}", render_summary(&run));
    Ok(())
}

/// Resolves on Ctrl-C. Never resolves when the signal cannot be watched.
async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, stopping after the current model is dropped"),
        Err(err) => {
            warn!(%err, "Cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        },
    }
}
