#![cfg(feature = "testing")]

use lmarc_process::testing::{Scripted, ScriptedRunner};
use lmarc_process::{CommandRunner, CommandSpec, ProcessError};
use std::time::Duration;

#[tokio::test]
async fn replays_in_order_and_repeats_last() {
    let runner = ScriptedRunner::new()
        .respond("ollama list", "first")
        .respond("ollama list", "second");
    let spec = CommandSpec::new("ollama").arg("list");

    assert_eq!(runner.run(&spec).await.unwrap().stdout, "first");
    assert_eq!(runner.run(&spec).await.unwrap().stdout, "second");
    assert_eq!(runner.run(&spec).await.unwrap().stdout, "second");
    assert_eq!(runner.calls().len(), 3);
}

#[tokio::test]
async fn unknown_lines_and_timeouts() {
    let runner = ScriptedRunner::new().script("ollama run slow hi", Scripted::Timeout);

    let unknown = runner.run(&CommandSpec::new("nvidia-smi")).await.unwrap_err();
    assert!(matches!(unknown, ProcessError::NotFound { .. }));

    let spec = CommandSpec::new("ollama")
        .args(["run", "slow", "hi"])
        .timeout(Duration::from_secs(120));
    let timeout = runner.run(&spec).await.unwrap_err();
    assert!(matches!(timeout, ProcessError::Timeout { .. }));
}
