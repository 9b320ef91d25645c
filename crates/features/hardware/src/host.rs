//! Host facts available on every platform, collected with `sysinfo`.

use chrono::NaiveDate;
use lmarc_domain::constants::BYTES_PER_GB;
use lmarc_domain::hardware::{CpuInfo, HardwareSnapshot, MemoryInfo, OsInfo};
use lmarc_domain::round2;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};
use tracing::info;

/// Blocking: `sysinfo` reads procfs/sysctl synchronously.
#[must_use]
pub fn collect_host(taken_on: NaiveDate) -> HardwareSnapshot {
    let sys = System::new_with_specifics(
        RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything()),
    );

    let first = sys.cpus().first();
    let cpu = CpuInfo {
        brand: first.map(|cpu| cpu.brand().trim().to_owned()).unwrap_or_default(),
        vendor: first.map(|cpu| cpu.vendor_id().trim().to_owned()).unwrap_or_default(),
        logical_cores: sys.cpus().len(),
        frequency_mhz: first.map_or(0, sysinfo::Cpu::frequency),
    };

    let memory = MemoryInfo {
        total_gb: to_gb(sys.total_memory()),
        available_gb: to_gb(sys.available_memory()),
        swap_total_gb: to_gb(sys.total_swap()),
    };

    let os = OsInfo {
        name: System::name(),
        version: System::os_version(),
        kernel: System::kernel_version(),
        arch: std::env::consts::ARCH.to_owned(),
    };

    info!(
        cpu = %cpu.brand,
        cores = cpu.logical_cores,
        memory_gb = memory.total_gb,
        "Collected host facts"
    );

    HardwareSnapshot {
        taken_on,
        host_name: System::host_name(),
        os,
        cpu,
        memory,
        gpus: Vec::new(),
        probes: Vec::new(),
        notes: Vec::new(),
    }
}

fn to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GB)
}
