use crate::benchmark::BenchSettings;
use chrono::Local;
use lmarc_domain::bench::{BenchmarkRun, ModelBenchmark, SystemInfo, TestConfiguration};
use lmarc_domain::constants::BYTES_PER_GB;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

/// Wraps per-model results into the results file, stamped now.
#[must_use]
pub fn assemble(results: Vec<ModelBenchmark>, settings: &BenchSettings) -> BenchmarkRun {
    BenchmarkRun {
        benchmark_date: Local::now().naive_local(),
        system_info: system_info(),
        test_configuration: TestConfiguration {
            prompts: settings.prompts.clone(),
            timeout_seconds: settings.timeout.as_secs(),
        },
        results,
    }
}

/// Logical CPUs, total memory in GB (one decimal) and the tool version.
#[must_use]
pub fn system_info() -> SystemInfo {
    let sys = System::new_with_specifics(
        RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::nothing().with_ram()),
    );

    SystemInfo {
        cpu_count: sys.cpus().len(),
        memory_gb: (sys.total_memory() as f64 / BYTES_PER_GB * 10.0).round() / 10.0,
        tool_version: format!("lmarc {}", env!("CARGO_PKG_VERSION")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lmarc_domain::bench::ranked;

    fn model(name: &str, tps: f64) -> ModelBenchmark {
        let at = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap().and_hms_opt(10, 0, 0).unwrap();
        let mut benchmark = ModelBenchmark::new(name, at);
        benchmark.average_tps = tps;
        benchmark
    }

    #[test]
    fn ranking_drops_models_without_throughput() {
        let results = vec![model("slow", 8.5), model("broken", 0.0), model("fast", 61.2)];
        let names: Vec<&str> = ranked(&results).iter().map(|r| r.model.as_str()).collect();
        assert_eq!(names, ["fast", "slow"]);
    }

    #[test]
    fn assembled_run_describes_this_host() {
        let run = assemble(vec![model("fast", 61.2)], &BenchSettings::default());
        assert!(run.system_info.cpu_count > 0);
        assert!(run.system_info.memory_gb > 0.0);
        assert!(run.system_info.tool_version.starts_with("lmarc "));
        assert_eq!(run.test_configuration.timeout_seconds, 120);
        assert_eq!(run.test_configuration.prompts.len(), 3);
        assert_eq!(run.results.len(), 1);
    }
}
