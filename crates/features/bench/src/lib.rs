//! # Model Benchmark
//!
//! Sends the same prompts to every installed model through `ollama run`, measures
//! wall-clock time, an estimated token count and the memory delta around each
//! inference, and aggregates them per model.
//!
//! A prompt that fails or times out is recorded as
//! [`PromptOutcome::Failed`](lmarc_domain::bench::PromptOutcome::Failed); the run goes on.

mod benchmark;
mod error;
mod gauge;
mod run;

pub use crate::benchmark::{BenchOutcome, BenchSettings, Benchmark, Inference, count_tokens, preview};
pub use crate::error::{BenchError, BenchErrorExt};
pub use crate::gauge::{MemoryGauge, SystemGauge};
pub use crate::run::{assemble, system_info};
pub use lmarc_domain::bench::ranked;
