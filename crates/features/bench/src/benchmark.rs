use crate::error::BenchError;
use crate::gauge::{MemoryGauge, SystemGauge};
use chrono::Local;
use lmarc_domain::bench::{ModelBenchmark, PromptMetrics, PromptOutcome, PromptResult, TestPrompt};
use lmarc_domain::config::ArchiveConfig;
use lmarc_domain::round2;
use lmarc_process::{CommandRunner, CommandSpec, ProcessError, is_available};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

const ELLIPSIS: &str = "...";

/// What a benchmark run sends and how long it waits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchSettings {
    pub binary: String,
    pub timeout: Duration,
    pub prompts: Vec<TestPrompt>,
    /// Responses longer than this many characters are truncated in the results.
    pub preview_chars: usize,
}

impl BenchSettings {
    #[must_use]
    pub fn from_config(config: &ArchiveConfig) -> Self {
        Self {
            binary: config.ollama.binary.clone(),
            timeout: Duration::from_secs(config.ollama.timeout_seconds),
            prompts: config.bench.prompts.clone(),
            preview_chars: config.bench.preview_chars,
        }
    }
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self::from_config(&ArchiveConfig::default())
    }
}

/// One inference: the full response plus its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub response: String,
    pub outcome: PromptOutcome,
    /// Unrounded seconds, zero on failure.
    pub seconds: f64,
    /// Unrounded tokens per second, zero on failure.
    pub tokens_per_second: f64,
}

impl Inference {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            response: String::new(),
            outcome: PromptOutcome::Failed { error: error.into() },
            seconds: 0.0,
            tokens_per_second: 0.0,
        }
    }
}

/// Results of [`Benchmark::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct BenchOutcome {
    /// Every model benchmarked to completion, in run order.
    pub results: Vec<ModelBenchmark>,
    /// `true` when the interrupt fired before all models were done.
    pub interrupted: bool,
}

/// Runs the standardized prompts against models, one inference at a time.
#[derive(Debug)]
pub struct Benchmark<R, G = SystemGauge> {
    runner: R,
    gauge: G,
    settings: BenchSettings,
}

impl<R: CommandRunner> Benchmark<R> {
    #[must_use]
    pub fn new(runner: R, settings: BenchSettings) -> Self {
        Self { runner, gauge: SystemGauge::new(), settings }
    }
}

impl<R: CommandRunner, G: MemoryGauge> Benchmark<R, G> {
    #[must_use]
    pub fn with_gauge<N: MemoryGauge>(self, gauge: N) -> Benchmark<R, N> {
        Benchmark { runner: self.runner, gauge, settings: self.settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &BenchSettings {
        &self.settings
    }

    /// Fails unless `<binary> --version` runs.
    ///
    /// # Errors
    /// Returns [`BenchError::OllamaMissing`] when the tool is absent or broken.
    pub async fn ensure_available(&self) -> Result<(), BenchError> {
        if is_available(&self.runner, &self.settings.binary).await {
            Ok(())
        } else {
            Err(BenchError::OllamaMissing {
                message: format!("`{} --version` failed; install Ollama first", self.settings.binary)
                    .into(),
                context: None,
            })
        }
    }

    /// Runs `<binary> run <model> <prompt>` and measures it.
    pub async fn run_inference(&mut self, model: &str, prompt: &str) -> Inference {
        let spec = CommandSpec::new(&self.settings.binary)
            .args(["run", model, prompt])
            .timeout(self.settings.timeout);

        let memory_before = self.gauge.used_mb();
        let output = match self.runner.run(&spec).await {
            Ok(output) => output,
            Err(ProcessError::Timeout { .. }) => {
                return Inference::failed(format!(
                    "Timeout after {} seconds",
                    self.settings.timeout.as_secs()
                ));
            },
            Err(err) => return Inference::failed(err.to_string()),
        };

        if !output.success() {
            let stderr = output.stderr.trim();
            return Inference::failed(if stderr.is_empty() {
                let status = output.code.map_or_else(|| "signal".to_owned(), |code| code.to_string());
                format!("{} exited with status {status}", spec.program())
            } else {
                stderr.to_owned()
            });
        }

        let response = output.stdout.trim().to_owned();
        let seconds = output.elapsed.as_secs_f64();
        let tokens = count_tokens(&response);
        let tokens_per_second = if seconds > 0.0 { tokens as f64 / seconds } else { 0.0 };
        let memory_delta = self.gauge.used_mb() - memory_before;

        let metrics = PromptMetrics {
            total_time: round2(seconds),
            tokens_generated: tokens,
            tokens_per_second: round2(tokens_per_second),
            memory_delta_mb: round2(memory_delta),
            response_length: response.chars().count(),
        };

        Inference { response, outcome: PromptOutcome::Completed(metrics), seconds, tokens_per_second }
    }

    /// Runs every prompt against `model` and aggregates the successful ones.
    pub async fn benchmark_model(&mut self, model: &str) -> ModelBenchmark {
        let mut benchmark = ModelBenchmark::new(model, Local::now().naive_local());
        let prompts = self.settings.prompts.clone();

        let mut total_tps = 0.0;
        let mut total_time = 0.0;
        let mut successes = 0_usize;

        for prompt in &prompts {
            let inference = self.run_inference(model, &prompt.prompt).await;

            match &inference.outcome {
                PromptOutcome::Completed(_) => {
                    total_tps += inference.tokens_per_second;
                    total_time += inference.seconds;
                    successes += 1;
                    info!(
                        model,
                        prompt = %prompt.name,
                        tps = round2(inference.tokens_per_second),
                        seconds = round2(inference.seconds),
                        "Prompt completed"
                    );
                },
                PromptOutcome::Failed { error } => {
                    warn!(model, prompt = %prompt.name, %error, "Prompt failed");
                },
            }

            benchmark.prompts.push(PromptResult {
                name: prompt.name.clone(),
                prompt: prompt.prompt.clone(),
                response: preview(&inference.response, self.settings.preview_chars),
                metrics: inference.outcome,
            });
        }

        if successes > 0 {
            let n = successes as f64;
            benchmark.average_tps = round2(total_tps / n);
            benchmark.average_time = round2(total_time / n);
            benchmark.success_rate = Some(round2(n / prompts.len() as f64));
        }

        benchmark
    }

    /// Benchmarks `models` in order until done or until `interrupt` resolves.
    ///
    /// A model still in progress when the interrupt fires is dropped; its running
    /// inference is killed. Models finished before that are kept.
    pub async fn run<F>(&mut self, models: &[String], interrupt: F) -> BenchOutcome
    where
        F: Future<Output = ()>,
    {
        let mut interrupt = std::pin::pin!(interrupt);
        let mut results = Vec::with_capacity(models.len());

        info!(models = models.len(), prompts = self.settings.prompts.len(), "Starting benchmark");

        for (index, model) in models.iter().enumerate() {
            info!(model = %model, "[{}/{}] Processing", index + 1, models.len());

            tokio::select! {
                biased;
                () = &mut interrupt => {
                    warn!(completed = results.len(), "Benchmark interrupted by user");
                    return BenchOutcome { results, interrupted: true };
                },
                result = self.benchmark_model(model) => results.push(result),
            }
        }

        BenchOutcome { results, interrupted: false }
    }
}

/// Whitespace-separated words, the token estimate stored in results.
#[must_use]
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// At most `limit` characters, with `...` appended when something was cut.
#[must_use]
pub fn preview(response: &str, limit: usize) -> String {
    match response.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &response[..cut]),
        None => response.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_whitespace_words() {
        assert_eq!(count_tokens("  Hello,   world!\nHow are you?  "), 5);
        assert_eq!(count_tokens(""), 0);
    }

    #[test]
    fn preview_truncates_on_char_boundaries() {
        assert_eq!(preview("short", 200), "short");
        assert_eq!(preview("abcdef", 6), "abcdef");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("ééééé", 2), "éé...");
    }

    #[test]
    fn settings_follow_config() {
        let settings = BenchSettings::default();
        assert_eq!(settings.binary, "ollama");
        assert_eq!(settings.timeout, Duration::from_secs(120));
        assert_eq!(settings.prompts.len(), 3);
        assert_eq!(settings.preview_chars, 200);
    }
}
