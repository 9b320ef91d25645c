use lmarc_domain::constants::BYTES_PER_MB;
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

/// Source of the "memory in use" reading taken around each inference.
pub trait MemoryGauge: Send {
    /// Memory currently in use, in MB.
    fn used_mb(&mut self) -> f64;
}

/// System-wide used memory via `sysinfo`.
///
/// The model server runs in its own process, so the delta of the whole system is
/// what reflects the model being loaded.
#[derive(Debug)]
pub struct SystemGauge {
    system: System,
}

impl SystemGauge {
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: System::new_with_specifics(
                RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
            ),
        }
    }
}

impl Default for SystemGauge {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGauge for SystemGauge {
    fn used_mb(&mut self) -> f64 {
        self.system.refresh_memory();
        self.system.used_memory() as f64 / BYTES_PER_MB
    }
}
