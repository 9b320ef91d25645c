use crate::bench::{TestPrompt, default_prompts};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration of the archive tools.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveConfigInner {
    pub archive: ArchiveSettings,
    pub ollama: OllamaConfig,
    pub bench: BenchConfig,
    pub hardware: HardwareConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into recorders.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    #[serde(flatten, default)]
    inner: Arc<ArchiveConfigInner>,
}

impl Deref for ArchiveConfig {
    type Target = ArchiveConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ArchiveConfig {
    fn deref_mut(&mut self) -> &mut ArchiveConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where snapshots live and whether existing ones may be replaced.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveSettings {
    pub root: PathBuf,
    pub overwrite: bool,
}

/// How to reach the model-serving tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OllamaConfig {
    pub binary: String,
    /// Per-inference timeout.
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    pub prompts: Vec<TestPrompt>,
    /// Responses longer than this are truncated in the results file.
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Query `nvidia-smi` for GPU name, driver and memory.
    pub gpu_query: bool,
    /// Extra commands whose output is transcribed verbatim.
    pub probes: Vec<ProbeCommand>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProbeCommand {
    pub label: String,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
}

// --- Default ---

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self { root: PathBuf::from("."), overwrite: false }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self { binary: "ollama".to_owned(), timeout_seconds: 120 }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self { prompts: default_prompts(), preview_chars: 200 }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self { gpu_query: true, probes: Vec::new() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false }
    }
}
