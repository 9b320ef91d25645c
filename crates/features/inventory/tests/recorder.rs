use chrono::NaiveDate;
use lmarc_inventory::{InventoryError, InventoryRecorder, render_markdown};
use lmarc_process::testing::{Scripted, ScriptedRunner};

const LISTING: &str = "\
NAME                       ID              SIZE      MODIFIED
llama3.2:3b                a80c4f17acd5    2.0 GB    3 weeks ago
qwen2.5-coder:7b           2b0496514337    4.7 GB    5 days ago
";

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
}

#[tokio::test]
async fn records_listing_into_snapshot() {
    let runner = ScriptedRunner::new().respond("ollama list", LISTING);
    let recorder = InventoryRecorder::new(&runner, "ollama");

    let inventory = recorder.record(day()).await.unwrap();
    assert_eq!(inventory.taken_on, day());
    assert_eq!(inventory.names(), ["llama3.2:3b", "qwen2.5-coder:7b"]);
    assert_eq!(inventory.raw_listing, LISTING);
    assert!((inventory.total_size_gb() - 6.7).abs() < 1e-9);
    assert_eq!(runner.calls(), ["ollama list"]);

    let text = render_markdown(&inventory);
    assert!(text.contains("| qwen2.5-coder:7b | 4.70 | Code generation |"));
}

#[tokio::test]
async fn custom_binary_is_used() {
    let runner = ScriptedRunner::new().respond("/opt/ollama list", LISTING);
    let recorder = InventoryRecorder::new(&runner, "/opt/ollama");

    assert_eq!(recorder.model_names().await.unwrap(), ["llama3.2:3b", "qwen2.5-coder:7b"]);
}

#[tokio::test]
async fn non_zero_exit_fails_the_snapshot() {
    let runner = ScriptedRunner::new()
        .script("ollama list", Scripted::fail(1, "Error: could not connect to ollama app"));
    let recorder = InventoryRecorder::new(&runner, "ollama");

    let err = recorder.record(day()).await.unwrap_err();
    assert!(matches!(err, InventoryError::Listing { .. }));
    assert!(err.to_string().contains("could not connect to ollama app"), "{err}");
}

#[tokio::test]
async fn missing_tool_fails_the_snapshot() {
    let runner = ScriptedRunner::new();
    let recorder = InventoryRecorder::new(&runner, "ollama");

    let err = recorder.model_names().await.unwrap_err();
    assert!(err.to_string().contains("Program not found"), "{err}");
}
