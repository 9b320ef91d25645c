use crate::error::HardwareError;
use crate::gpu::{NVIDIA_SMI, QUERY_ARGS, parse_gpu_csv};
use crate::host::collect_host;
use chrono::NaiveDate;
use lmarc_domain::config::{HardwareConfig, ProbeCommand};
use lmarc_domain::hardware::{HardwareSnapshot, RawProbe};
use lmarc_process::{CommandRunner, CommandSpec, ProcessError};
use std::time::Duration;
use tracing::{info, warn};

const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Captures a [`HardwareSnapshot`]: host facts, GPUs and the configured probes.
#[derive(Debug, Clone)]
pub struct HardwareRecorder<R> {
    runner: R,
    config: HardwareConfig,
}

impl<R: CommandRunner> HardwareRecorder<R> {
    #[must_use]
    pub const fn new(runner: R, config: HardwareConfig) -> Self {
        Self { runner, config }
    }

    /// # Errors
    /// Returns [`HardwareError::Collection`] when the blocking host collection fails.
    /// Missing GPU tools and failing probes only add notes.
    pub async fn record(&self, date: NaiveDate) -> Result<HardwareSnapshot, HardwareError> {
        let mut snapshot = tokio::task::spawn_blocking(move || collect_host(date))
            .await
            .map_err(|err| HardwareError::Collection {
                message: err.to_string().into(),
                context: Some("sysinfo task".into()),
            })?;

        if self.config.gpu_query {
            self.query_gpus(&mut snapshot).await;
        }

        for probe in &self.config.probes {
            self.run_probe(probe, &mut snapshot).await;
        }

        info!(
            %date,
            gpus = snapshot.gpus.len(),
            probes = snapshot.probes.len(),
            notes = snapshot.notes.len(),
            "Hardware snapshot recorded"
        );
        Ok(snapshot)
    }

    async fn query_gpus(&self, snapshot: &mut HardwareSnapshot) {
        let spec = CommandSpec::new(NVIDIA_SMI).args(QUERY_ARGS).timeout(PROBE_TIMEOUT);
        match self.runner.run(&spec).await.and_then(|output| output.ensure_success(&spec)) {
            Ok(output) => {
                snapshot.gpus = parse_gpu_csv(&output.stdout);
                if snapshot.gpus.is_empty() {
                    snapshot.notes.push(format!("{NVIDIA_SMI} reported no GPUs"));
                }
            },
            Err(ProcessError::NotFound { .. }) => {
                snapshot.notes.push(format!("{NVIDIA_SMI} not found; no NVIDIA GPU detected"));
            },
            Err(err) => {
                warn!(error = %err, "GPU query failed");
                snapshot.notes.push(format!("GPU query failed: {err}"));
            },
        }
    }

    async fn run_probe(&self, probe: &ProbeCommand, snapshot: &mut HardwareSnapshot) {
        let spec = CommandSpec::new(&probe.program).args(&probe.args).timeout(PROBE_TIMEOUT);
        match self.runner.run(&spec).await.and_then(|output| output.ensure_success(&spec)) {
            Ok(output) => snapshot.probes.push(RawProbe {
                label: probe.label.clone(),
                command: spec.to_string(),
                output: output.stdout,
            }),
            Err(err) => {
                warn!(probe = %probe.label, error = %err, "Probe failed");
                snapshot.notes.push(format!("Probe '{}' failed: {err}", probe.label));
            },
        }
    }
}
