use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A standardized prompt sent to every model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestPrompt {
    pub name: String,
    pub prompt: String,
    pub expected_tokens: u32,
}

impl TestPrompt {
    #[must_use]
    pub fn new(name: impl Into<String>, prompt: impl Into<String>, expected_tokens: u32) -> Self {
        Self { name: name.into(), prompt: prompt.into(), expected_tokens }
    }
}

/// The three prompts every benchmark run uses unless configured otherwise.
#[must_use]
pub fn default_prompts() -> Vec<TestPrompt> {
    vec![
        TestPrompt::new(
            "Creative Writing",
            "Write a short story about a robot discovering emotions for the first time.",
            150,
        ),
        TestPrompt::new(
            "Technical Explanation",
            "Explain how neural networks work in simple terms that a beginner could understand.",
            200,
        ),
        TestPrompt::new(
            "Code Generation",
            "Write a Python function that calculates the factorial of a number using recursion.",
            100,
        ),
    ]
}

/// Measurements of one successful inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMetrics {
    /// Wall-clock seconds, two decimals.
    pub total_time: f64,
    pub tokens_generated: usize,
    pub tokens_per_second: f64,
    pub memory_delta_mb: f64,
    /// Response length in characters.
    pub response_length: usize,
}

/// Either the metrics of a completed inference or the reason it failed.
///
/// Serialized untagged: a failure is `{"error": "..."}`, a success is the flat
/// metrics object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PromptOutcome {
    Completed(PromptMetrics),
    Failed { error: String },
}

impl PromptOutcome {
    #[must_use]
    pub const fn metrics(&self) -> Option<&PromptMetrics> {
        match self {
            Self::Completed(metrics) => Some(metrics),
            Self::Failed { .. } => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Completed(_) => None,
            Self::Failed { error } => Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptResult {
    pub name: String,
    pub prompt: String,
    /// Response preview, truncated with `...`.
    pub response: String,
    pub metrics: PromptOutcome,
}

/// Aggregated results of one model over all prompts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBenchmark {
    pub model: String,
    pub timestamp: NaiveDateTime,
    pub prompts: Vec<PromptResult>,
    pub average_tps: f64,
    pub average_time: f64,
    /// Absent when no prompt succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
}

impl ModelBenchmark {
    #[must_use]
    pub fn new(model: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            model: model.into(),
            timestamp,
            prompts: Vec::new(),
            average_tps: 0.0,
            average_time: 0.0,
            success_rate: None,
        }
    }

    /// `true` when at least one prompt produced tokens.
    #[must_use]
    pub fn has_throughput(&self) -> bool {
        self.average_tps > 0.0
    }

    /// Prompt name and error message of every failed prompt.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prompts
            .iter()
            .filter_map(|result| result.metrics.error().map(|error| (result.name.as_str(), error)))
    }
}

/// Models that produced tokens, fastest first. Ties keep their original order.
#[must_use]
pub fn ranked(results: &[ModelBenchmark]) -> Vec<&ModelBenchmark> {
    let mut ranked: Vec<&ModelBenchmark> =
        results.iter().filter(|result| result.has_throughput()).collect();
    ranked.sort_by(|a, b| b.average_tps.total_cmp(&a.average_tps));
    ranked
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub cpu_count: usize,
    pub memory_gb: f64,
    /// Version of the tool that produced the run. Older result files call it `python_version`.
    #[serde(alias = "python_version")]
    pub tool_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfiguration {
    pub prompts: Vec<TestPrompt>,
    pub timeout_seconds: u64,
}

/// Contents of a `benchmark-results-YYYY-MM-DD.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    pub benchmark_date: NaiveDateTime,
    pub system_info: SystemInfo,
    pub test_configuration: TestConfiguration,
    pub results: Vec<ModelBenchmark>,
}

impl BenchmarkRun {
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.benchmark_date.date()
    }
}
