use crate::records::{BenchmarkRecord, nothing_ranked, records, silent, unsuccessful};
use lmarc_domain::bench::{BenchmarkRun, ModelBenchmark};
use lmarc_domain::constants::DATE_FORMAT;
use lmarc_domain::inventory::ModelInventory;
use std::fmt::Write as _;

const MISSING: &str = "-";

/// Composes the markdown benchmark report.
///
/// `inventory` supplies model sizes; without it the size column shows `-`.
#[must_use]
pub fn render_report(run: &BenchmarkRun, inventory: Option<&ModelInventory>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Benchmark Report: {}\n", run.date().format(DATE_FORMAT));
    let _ = writeln!(
        out,
        "Benchmarked on {} with {}.\n",
        run.benchmark_date.format("%Y-%m-%d %H:%M:%S"),
        run.system_info.tool_version
    );
    if let Some(inventory) = inventory {
        let _ = writeln!(
            out,
            "Model sizes from the inventory of {}.\n",
            inventory.taken_on.format(DATE_FORMAT)
        );
    }

    system_section(&mut out, run);
    configuration_section(&mut out, run);

    let rows = records(run, inventory);
    rankings_section(&mut out, run, &rows);
    highlights_section(&mut out, &rows);
    failures_section(&mut out, run);

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

fn system_section(out: &mut String, run: &BenchmarkRun) {
    let info = &run.system_info;
    out.push_str("## System\n\n| Property | Value |\n|----------|-------|\n");
    let _ = writeln!(out, "| CPU cores | {} |", info.cpu_count);
    let _ = writeln!(out, "| Memory | {:.1} GB |", info.memory_gb);
    let _ = writeln!(out, "| Tool | {} |\n", cell(&info.tool_version));
}

fn configuration_section(out: &mut String, run: &BenchmarkRun) {
    let config = &run.test_configuration;
    let _ = writeln!(
        out,
        "## Test Configuration\n\nEach prompt is allowed {} seconds.\n",
        config.timeout_seconds
    );
    if config.prompts.is_empty() {
        return;
    }

    out.push_str("| Prompt | Expected tokens | Text |\n|--------|----------------:|------|\n");
    for prompt in &config.prompts {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            cell(&prompt.name),
            prompt.expected_tokens,
            cell(&prompt.prompt)
        );
    }
    out.push('\n');
}

fn rankings_section(out: &mut String, run: &BenchmarkRun, rows: &[BenchmarkRecord]) {
    out.push_str("## Rankings\n\n");
    if rows.is_empty() {
        let _ = writeln!(out, "{}.\n", nothing_ranked(run));
        return;
    }

    out.push_str("| Rank | Model | TPS | Time | Success Rate | Size |\n");
    out.push_str("|-----:|-------|----:|-----:|-------------:|-----:|\n");
    for row in rows {
        let rate = row
            .success_rate
            .map_or_else(|| MISSING.to_owned(), |rate| format!("{:.0}%", rate * 100.0));
        let size = row.size_gb.map_or_else(|| MISSING.to_owned(), |gb| format!("{gb:.2} GB"));
        let _ = writeln!(
            out,
            "| {} | {} | {:.2} | {:.2} s | {rate} | {size} |",
            row.rank,
            cell(&row.model),
            row.tokens_per_second,
            row.time
        );
    }
    out.push('\n');
}

fn highlights_section(out: &mut String, rows: &[BenchmarkRecord]) {
    let (Some(fastest), Some(slowest)) = (rows.first(), rows.last()) else {
        return;
    };

    out.push_str("## Highlights\n\n");
    if rows.len() == 1 {
        let _ = writeln!(
            out,
            "Only **{}** completed a prompt, at {:.2} tokens/sec.\n",
            fastest.model, fastest.tokens_per_second
        );
        return;
    }

    let _ = write!(
        out,
        "**{}** was the fastest at {:.2} tokens/sec and **{}** the slowest at {:.2} tokens/sec",
        fastest.model, fastest.tokens_per_second, slowest.model, slowest.tokens_per_second
    );
    if slowest.tokens_per_second > 0.0 {
        let _ = write!(
            out,
            ", a {:.1}x difference",
            fastest.tokens_per_second / slowest.tokens_per_second
        );
    }
    out.push_str(".\n");

    let incomplete: Vec<&str> = rows
        .iter()
        .filter(|row| row.success_rate.is_some_and(|rate| rate < 1.0))
        .map(|row| row.model.as_str())
        .collect();
    if !incomplete.is_empty() {
        let _ = writeln!(out, "Not every prompt succeeded for {}.", incomplete.join(", "));
    }
    out.push('\n');
}

fn failures_section(out: &mut String, run: &BenchmarkRun) {
    let failed: Vec<(&str, &str, &str)> = run
        .results
        .iter()
        .flat_map(|result| {
            result.failures().map(|(prompt, error)| (result.model.as_str(), prompt, error))
        })
        .collect();

    if !failed.is_empty() {
        out.push_str("## Failures\n\n");
        for (model, prompt, error) in failed {
            let _ = writeln!(out, "- **{model}**, {prompt}: {}", one_line(error));
        }
        out.push('\n');
    }

    model_list(out, "No Successful Runs", &unsuccessful(run));
    model_list(out, "Empty Responses", &silent(run));
}

fn model_list(out: &mut String, heading: &str, models: &[&ModelBenchmark]) {
    if models.is_empty() {
        return;
    }
    let _ = writeln!(out, "## {heading}\n");
    for result in models {
        let _ = writeln!(out, "- {}", result.model);
    }
    out.push('\n');
}

fn cell(text: &str) -> String {
    one_line(text).replace('|', "\\|")
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
