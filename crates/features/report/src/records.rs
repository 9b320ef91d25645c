use fxhash::FxHashMap;
use lmarc_domain::bench::{BenchmarkRun, ModelBenchmark, ranked};
use lmarc_domain::inventory::ModelInventory;

/// One row of the rankings table.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    /// 1-based, fastest first.
    pub rank: usize,
    pub model: String,
    pub tokens_per_second: f64,
    /// Average seconds per successful prompt.
    pub time: f64,
    pub success_rate: Option<f64>,
    /// Joined from the inventory by model name.
    pub size_gb: Option<f64>,
}

/// Ranked records of every model that produced tokens.
///
/// Ties keep the order of the results file.
#[must_use]
pub fn records(run: &BenchmarkRun, inventory: Option<&ModelInventory>) -> Vec<BenchmarkRecord> {
    let sizes: FxHashMap<&str, f64> = inventory
        .map(|inventory| {
            inventory
                .entries
                .iter()
                .filter_map(|entry| entry.size_gb.map(|size| (entry.name.as_str(), size)))
                .collect()
        })
        .unwrap_or_default();

    ranked(&run.results)
        .into_iter()
        .enumerate()
        .map(|(index, result)| BenchmarkRecord {
            rank: index + 1,
            model: result.model.clone(),
            tokens_per_second: result.average_tps,
            time: result.average_time,
            success_rate: result.success_rate,
            size_gb: sizes.get(result.model.as_str()).copied(),
        })
        .collect()
}

/// Models whose every prompt failed.
#[must_use]
pub fn unsuccessful(run: &BenchmarkRun) -> Vec<&ModelBenchmark> {
    run.results.iter().filter(|result| !completed_any(result)).collect()
}

/// Models that completed prompts without producing a single token.
#[must_use]
pub fn silent(run: &BenchmarkRun) -> Vec<&ModelBenchmark> {
    run.results
        .iter()
        .filter(|result| completed_any(result) && !result.has_throughput())
        .collect()
}

/// What to say when no model made it into the rankings.
pub(crate) fn nothing_ranked(run: &BenchmarkRun) -> &'static str {
    if run.results.iter().any(completed_any) {
        "No model produced any tokens"
    } else {
        "No model completed a prompt"
    }
}

fn completed_any(result: &ModelBenchmark) -> bool {
    result.success_rate.is_some_and(|rate| rate > 0.0)
}
