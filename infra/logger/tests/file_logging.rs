use lmarc_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn verbose_file_log_keeps_own_debug_lines_only() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let log_dir = tmp.path().join("logs");

    let logger = Logger::builder()
        .name("lmarc-file-logging")
        .console(false)
        .directory(&log_dir)
        .json(true)
        .directives("warn")
        .verbosity(1)
        .init()?;
    assert!(logger.writes_files());

    tracing::debug!(target: "lmarc_bench", model = "llama3.2:3b", "prompt completed");
    tracing::info!(target: "hyper", "connection pooled");
    tracing::trace!(target: "lmarc_archive", "too fine for -v");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(log_file)?;
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1, "{contents}");
    let value: serde_json::Value = serde_json::from_str(lines[0])?;
    assert_eq!(value["target"], "lmarc_bench");
    assert_eq!(value["fields"]["model"], "llama3.2:3b");

    Ok(())
}
