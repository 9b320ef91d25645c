use lmarc_domain::bench::{BenchmarkRun, PromptOutcome, default_prompts};
use serde_json::json;

#[test]
fn failed_outcome_serializes_as_error_object() {
    let outcome = PromptOutcome::Failed { error: "Timeout after 120 seconds".to_owned() };
    assert_eq!(serde_json::to_value(&outcome).unwrap(), json!({ "error": "Timeout after 120 seconds" }));
}

#[test]
fn results_file_from_earlier_tooling_is_readable() {
    let raw = json!({
        "benchmark_date": "2025-06-14T18:02:11.512345",
        "system_info": { "cpu_count": 16, "memory_gb": 62.7, "python_version": "3.12.3" },
        "test_configuration": { "prompts": default_prompts(), "timeout_seconds": 120 },
        "results": [{
            "model": "llama3.2:3b",
            "timestamp": "2025-06-14T18:02:11.600000",
            "prompts": [
                {
                    "name": "Creative Writing",
                    "prompt": "Write a short story...",
                    "response": "Unit 7 paused...",
                    "metrics": {
                        "total_time": 3.21,
                        "tokens_generated": 180,
                        "tokens_per_second": 56.07,
                        "memory_delta_mb": 0.12,
                        "response_length": 1024
                    }
                },
                {
                    "name": "Code Generation",
                    "prompt": "Write a Python function...",
                    "response": "",
                    "metrics": { "error": "Timeout after 120 seconds" }
                }
            ],
            "average_tps": 56.07,
            "average_time": 3.21,
            "success_rate": 0.5
        }]
    });

    let run: BenchmarkRun = serde_json::from_value(raw).expect("results deserialize");
    assert_eq!(run.system_info.tool_version, "3.12.3");
    assert_eq!(run.date().to_string(), "2025-06-14");

    let model = &run.results[0];
    assert!(model.has_throughput());
    assert_eq!(model.prompts[0].metrics.metrics().map(|m| m.tokens_generated), Some(180));
    assert_eq!(model.failures().collect::<Vec<_>>(), vec![("Code Generation", "Timeout after 120 seconds")]);
}

#[test]
fn missing_success_rate_is_allowed() {
    let raw = json!({
        "model": "broken:latest",
        "timestamp": "2025-06-14T18:02:11",
        "prompts": [],
        "average_tps": 0.0,
        "average_time": 0.0
    });
    let model: lmarc_domain::bench::ModelBenchmark = serde_json::from_value(raw).unwrap();
    assert!(model.success_rate.is_none());
    assert!(!model.has_throughput());
}
