use crate::error::{InventoryError, InventoryErrorExt};
use crate::listing::parse_listing;
use chrono::NaiveDate;
use lmarc_domain::inventory::ModelInventory;
use lmarc_process::{CommandRunner, CommandSpec};
use std::time::Duration;
use tracing::{debug, info};

const LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// Captures the installed models by running `<binary> list`.
#[derive(Debug, Clone)]
pub struct InventoryRecorder<R> {
    runner: R,
    binary: String,
}

impl<R: CommandRunner> InventoryRecorder<R> {
    #[must_use]
    pub fn new(runner: R, binary: impl Into<String>) -> Self {
        Self { runner, binary: binary.into() }
    }

    /// Runs the listing and parses it into a snapshot for `date`.
    ///
    /// # Errors
    /// Returns [`InventoryError::Listing`] when the tool is missing, times out or
    /// exits non-zero.
    pub async fn record(&self, date: NaiveDate) -> Result<ModelInventory, InventoryError> {
        let stdout = self.list().await?;
        let mut inventory = ModelInventory::new(date, parse_listing(&stdout));
        inventory.raw_listing = stdout;

        info!(%date, models = inventory.len(), total_gb = inventory.total_size_gb(), "Inventory recorded");
        Ok(inventory)
    }

    /// Names of the installed models, in listing order.
    ///
    /// # Errors
    /// Same as [`InventoryRecorder::record`].
    pub async fn model_names(&self) -> Result<Vec<String>, InventoryError> {
        let names: Vec<String> =
            parse_listing(&self.list().await?).into_iter().map(|entry| entry.name).collect();
        debug!(count = names.len(), "Installed models");
        Ok(names)
    }

    async fn list(&self) -> Result<String, InventoryError> {
        let spec = CommandSpec::new(&self.binary).arg("list").timeout(LIST_TIMEOUT);
        let output = self
            .runner
            .run(&spec)
            .await
            .and_then(|output| output.ensure_success(&spec))
            .context(format!("Failed to get models from `{spec}`"))?;
        Ok(output.stdout)
    }
}
