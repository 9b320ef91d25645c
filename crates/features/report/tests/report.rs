use chrono::NaiveDate;
use lmarc_archive::check_markdown;
use lmarc_domain::bench::BenchmarkRun;
use lmarc_domain::inventory::{ModelEntry, ModelInventory};
use lmarc_report::{records, render_report};
use serde_json::json;

fn run() -> BenchmarkRun {
    let ok = |tps: f64, time: f64| {
        json!({
            "total_time": time, "tokens_generated": 100, "tokens_per_second": tps,
            "memory_delta_mb": 0.0, "response_length": 500
        })
    };
    let prompt = |name: &str, metrics: serde_json::Value| {
        json!({ "name": name, "prompt": "p", "response": "r", "metrics": metrics })
    };

    serde_json::from_value(json!({
        "benchmark_date": "2025-06-14T09:30:00",
        "system_info": { "cpu_count": 16, "memory_gb": 62.7, "tool_version": "lmarc 0.1.0" },
        "test_configuration": {
            "prompts": [
                { "name": "Creative Writing", "prompt": "Write a story.", "expected_tokens": 150 },
                { "name": "Code Generation", "prompt": "Write a function.", "expected_tokens": 100 }
            ],
            "timeout_seconds": 120
        },
        "results": [
            {
                "model": "mistral:7b", "timestamp": "2025-06-14T09:30:01",
                "prompts": [prompt("Creative Writing", ok(20.0, 6.0)), prompt("Code Generation", json!({ "error": "Timeout after 120 seconds" }))],
                "average_tps": 20.0, "average_time": 6.0, "success_rate": 0.5
            },
            {
                "model": "llama3.2:3b", "timestamp": "2025-06-14T09:31:00",
                "prompts": [prompt("Creative Writing", ok(60.0, 2.0)), prompt("Code Generation", ok(62.5, 1.8))],
                "average_tps": 61.25, "average_time": 1.9, "success_rate": 1.0
            },
            {
                "model": "huge:70b", "timestamp": "2025-06-14T09:32:00",
                "prompts": [
                    prompt("Creative Writing", json!({ "error": "Error: model requires\nmore system memory" })),
                    prompt("Code Generation", json!({ "error": "Timeout after 120 seconds" }))
                ],
                "average_tps": 0.0, "average_time": 0.0
            }
        ]
    }))
    .unwrap()
}

fn inventory() -> ModelInventory {
    let mut llama = ModelEntry::new("llama3.2:3b");
    llama.size_gb = Some(2.0);
    let mistral = ModelEntry::new("mistral:7b");
    ModelInventory::new(NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(), vec![llama, mistral])
}

#[test]
fn records_are_ranked_with_sizes() {
    let rows = records(&run(), Some(&inventory()));
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].rank, rows[0].model.as_str(), rows[0].size_gb), (1, "llama3.2:3b", Some(2.0)));
    assert_eq!((rows[1].rank, rows[1].model.as_str(), rows[1].size_gb), (2, "mistral:7b", None));
    assert_eq!((rows[0].success_rate, rows[1].success_rate), (Some(1.0), Some(0.5)));
}

#[test]
fn report_has_rankings_prose_and_failures() {
    let text = render_report(&run(), Some(&inventory()));

    assert!(text.starts_with("# Benchmark Report: 2025-06-14\n"));
    assert!(text.contains("Model sizes from the inventory of 2025-06-13."));
    assert!(text.contains("| CPU cores | 16 |"));
    assert!(text.contains("| Creative Writing | 150 | Write a story. |"));
    assert!(text.contains("| Rank | Model | TPS | Time | Success Rate | Size |"));
    assert!(text.contains("| 1 | llama3.2:3b | 61.25 | 1.90 s | 100% | 2.00 GB |"));
    assert!(text.contains("| 2 | mistral:7b | 20.00 | 6.00 s | 50% | - |"));
    assert!(!text.contains("| 3 |"));
    assert!(text.contains(
        "**llama3.2:3b** was the fastest at 61.25 tokens/sec and **mistral:7b** the slowest at 20.00 tokens/sec, a 3.1x difference."
    ));
    assert!(text.contains("Not every prompt succeeded for mistral:7b."));
    assert!(text.contains("- **mistral:7b**, Code Generation: Timeout after 120 seconds"));
    assert!(text.contains("- **huge:70b**, Creative Writing: Error: model requires more system memory"));
    assert!(text.contains("## No Successful Runs\n\n- huge:70b\n"));
    assert!(!text.contains("## Empty Responses"));
}

#[test]
fn report_without_inventory_or_successes() {
    let mut run = run();
    run.results.retain(|result| result.model == "huge:70b");

    let text = render_report(&run, None);
    assert!(!text.contains("Model sizes from"));
    assert!(text.contains("## Rankings\n\nNo model completed a prompt.\n"));
    assert!(!text.contains("## Highlights"));
}

#[test]
fn empty_responses_are_listed_apart_from_failures() {
    let mut run = run();
    run.results.retain(|result| result.model == "huge:70b");
    let mut quiet = run.results[0].clone();
    quiet.model = "silent:1b".into();
    quiet.prompts.clear();
    quiet.average_time = 0.4;
    quiet.success_rate = Some(1.0);
    run.results.push(quiet);

    let text = render_report(&run, None);
    assert!(text.contains("## Rankings\n\nNo model produced any tokens.\n"));
    assert!(!text.contains("No model completed a prompt"));
    assert!(text.contains("## No Successful Runs\n\n- huge:70b\n"));
    assert!(text.contains("## Empty Responses\n\n- silent:1b\n"));
    assert_eq!(lmarc_report::unsuccessful(&run).len(), 1);
    assert_eq!(check_markdown(&text), Vec::<String>::new());
}

#[test]
fn rendered_report_passes_archive_lint() {
    let text = render_report(&run(), Some(&inventory()));
    assert_eq!(check_markdown(&text), Vec::<String>::new());
}
