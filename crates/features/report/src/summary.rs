use crate::records::{nothing_ranked, records};
use lmarc_domain::bench::BenchmarkRun;
use std::fmt::Write as _;

const WIDTH: usize = 80;
const NAME_CHARS: usize = 34;

/// Fixed-width console table of the run, fastest model first.
#[must_use]
pub fn render_summary(run: &BenchmarkRun) -> String {
    if run.results.is_empty() {
        return "No results to display\n".to_owned();
    }

    let rule = "=".repeat(WIDTH);
    let line = "-".repeat(WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}\nBENCHMARK SUMMARY ({})\n{rule}", run.date());
    let _ = writeln!(out, "{:<35} {:<12} {:<12} {:<10}", "Model", "Avg TPS", "Avg Time", "Success");
    let _ = writeln!(out, "{line}");

    let rows = records(run, None);
    for record in &rows {
        let name: String = record.model.chars().take(NAME_CHARS).collect();
        let tps = format!("{:.1}", record.tokens_per_second);
        let time = format!("{:.1}s", record.time);
        let success = format!("{:.0}%", record.success_rate.unwrap_or_default() * 100.0);
        let _ = writeln!(out, "{name:<35} {tps:<12} {time:<12} {success:<10}");
    }
    let _ = writeln!(out, "{line}");

    match rows.first() {
        Some(fastest) => {
            let _ = writeln!(
                out,
                "Fastest model: {} ({:.1} tokens/sec)",
                fastest.model, fastest.tokens_per_second
            );
        },
        None => {
            let _ = writeln!(out, "{}", nothing_ranked(run));
        },
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lmarc_domain::bench::{ModelBenchmark, SystemInfo, TestConfiguration};

    fn run(results: Vec<ModelBenchmark>) -> BenchmarkRun {
        BenchmarkRun {
            benchmark_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap().and_hms_opt(9, 30, 0).unwrap(),
            system_info: SystemInfo { cpu_count: 8, memory_gb: 31.2, tool_version: "lmarc 0.1.0".into() },
            test_configuration: TestConfiguration { prompts: Vec::new(), timeout_seconds: 120 },
            results,
        }
    }

    fn model(name: &str, tps: f64, time: f64, rate: Option<f64>) -> ModelBenchmark {
        let mut result = ModelBenchmark::new(name, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap().and_hms_opt(9, 31, 0).unwrap());
        result.average_tps = tps;
        result.average_time = time;
        result.success_rate = rate;
        result
    }

    #[test]
    fn empty_run_has_nothing_to_display() {
        assert_eq!(render_summary(&run(Vec::new())), "No results to display\n");
    }

    #[test]
    fn rows_are_sorted_truncated_and_aligned() {
        let long = "hf.co/bartowski/Some-Very-Long-Model-Name-GGUF:Q4_K_M";
        let text = render_summary(&run(vec![
            model("slow:70b", 2.14, 48.2, Some(0.67)),
            model(long, 35.0, 4.0, Some(1.0)),
            model("broken:1b", 0.0, 0.0, None),
        ]));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "BENCHMARK SUMMARY (2025-06-14)");
        assert_eq!(lines[3], format!("{:<35} {:<12} {:<12} {:<10}", "Model", "Avg TPS", "Avg Time", "Success"));
        assert_eq!(lines[5], format!("{:<35} {:<12} {:<12} {:<10}", &long[..34], "35.0", "4.0s", "100%"));
        assert_eq!(lines[6], format!("{:<35} {:<12} {:<12} {:<10}", "slow:70b", "2.1", "48.2s", "67%"));
        assert!(!text.contains("broken:1b"));
        assert_eq!(lines.last().copied(), Some(format!("Fastest model: {long} (35.0 tokens/sec)").as_str()));
    }

    #[test]
    fn all_failed_run_says_so() {
        let text = render_summary(&run(vec![model("broken:1b", 0.0, 0.0, None)]));
        assert!(text.ends_with("No model completed a prompt\n"));
    }

    #[test]
    fn empty_responses_are_not_called_failures() {
        let text = render_summary(&run(vec![model("silent:1b", 0.0, 0.4, Some(1.0))]));
        assert!(text.ends_with("No model produced any tokens\n"));
    }
}
