use lmarc_domain::constants::DATE_FORMAT;
use lmarc_domain::hardware::HardwareSnapshot;
use std::fmt::Write as _;

const UNKNOWN: &str = "unknown";

/// Renders the snapshot file contents: CPU, Memory, GPU and System sections, then
/// notes and probe outputs verbatim.
#[must_use]
pub fn render_markdown(snapshot: &HardwareSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Hardware Snapshot: {}\n", snapshot.taken_on.format(DATE_FORMAT));
    if let Some(host) = &snapshot.host_name {
        let _ = writeln!(out, "Host: `{host}`\n");
    }

    let cpu = &snapshot.cpu;
    out.push_str("## CPU\n\n");
    property_table(&mut out, &[
        ("Model", or_unknown(&cpu.brand)),
        ("Vendor", or_unknown(&cpu.vendor)),
        ("Logical cores", cpu.logical_cores.to_string()),
        ("Frequency", format!("{} MHz", cpu.frequency_mhz)),
    ]);

    let memory = &snapshot.memory;
    out.push_str("## Memory\n\n");
    property_table(&mut out, &[
        ("Total", format!("{:.2} GB", memory.total_gb)),
        ("Available", format!("{:.2} GB", memory.available_gb)),
        ("Swap", format!("{:.2} GB", memory.swap_total_gb)),
    ]);

    out.push_str("## GPU\n\n");
    if snapshot.gpus.is_empty() {
        out.push_str("No GPU detected.\n\n");
    } else {
        out.push_str("| GPU | Driver | Memory (MB) |\n|-----|--------|------------:|\n");
        for gpu in &snapshot.gpus {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                gpu.name.replace('|', "\\|"),
                gpu.driver_version.as_deref().unwrap_or(UNKNOWN),
                gpu.memory_mb.map_or_else(|| UNKNOWN.to_owned(), |mb| mb.to_string()),
            );
        }
        out.push('\n');
    }

    let os = &snapshot.os;
    out.push_str("## System\n\n");
    property_table(&mut out, &[
        ("OS", os.name.clone().unwrap_or_else(|| UNKNOWN.to_owned())),
        ("Version", os.version.clone().unwrap_or_else(|| UNKNOWN.to_owned())),
        ("Kernel", os.kernel.clone().unwrap_or_else(|| UNKNOWN.to_owned())),
        ("Architecture", os.arch.clone()),
    ]);

    if !snapshot.notes.is_empty() {
        out.push_str("## Notes\n\n");
        for note in &snapshot.notes {
            let _ = writeln!(out, "- {note}");
        }
        out.push('\n');
    }

    for probe in &snapshot.probes {
        let _ = write!(
            out,
            "## {}\n\n`{}`\n\n```text\n{}\n```\n\n",
            probe.label,
            probe.command,
            probe.output.trim_end()
        );
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

fn property_table(out: &mut String, rows: &[(&str, String)]) {
    out.push_str("| Property | Value |\n|----------|-------|\n");
    for (name, value) in rows {
        let _ = writeln!(out, "| {name} | {} |", value.replace('|', "\\|"));
    }
    out.push('\n');
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() { UNKNOWN.to_owned() } else { value.to_owned() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lmarc_domain::hardware::{CpuInfo, GpuInfo, MemoryInfo, OsInfo, RawProbe};

    fn snapshot() -> HardwareSnapshot {
        HardwareSnapshot {
            taken_on: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            host_name: Some("workstation".into()),
            os: OsInfo {
                name: Some("Ubuntu".into()),
                version: Some("24.04".into()),
                kernel: None,
                arch: "x86_64".into(),
            },
            cpu: CpuInfo {
                brand: "AMD Ryzen 7 7800X3D 8-Core Processor".into(),
                vendor: "AuthenticAMD".into(),
                logical_cores: 16,
                frequency_mhz: 4200,
            },
            memory: MemoryInfo { total_gb: 62.5, available_gb: 48.25, swap_total_gb: 8.0 },
            gpus: vec![GpuInfo {
                name: "NVIDIA GeForce RTX 4090".into(),
                driver_version: Some("550.54.14".into()),
                memory_mb: Some(24564),
            }],
            probes: vec![RawProbe {
                label: "Block devices".into(),
                command: "lsblk -d".into(),
                output: "NAME SIZE\nnvme0n1 1.8T\n\n".into(),
            }],
            notes: vec!["Probe 'sensors' failed: Program not found: sensors".into()],
        }
    }

    #[test]
    fn renders_sections_in_order() {
        let text = render_markdown(&snapshot());
        let order = ["# Hardware Snapshot: 2025-06-14", "## CPU", "## Memory", "## GPU", "## System", "## Notes", "## Block devices"];
        let positions: Vec<usize> = order.iter().map(|h| text.find(h).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");

        assert!(text.contains("| Logical cores | 16 |"));
        assert!(text.contains("| Total | 62.50 GB |"));
        assert!(text.contains("| NVIDIA GeForce RTX 4090 | 550.54.14 | 24564 |"));
        assert!(text.contains("| Kernel | unknown |"));
        assert!(text.contains("`lsblk -d`\n\n```text\nNAME SIZE\nnvme0n1 1.8T\n```\n"));
        assert!(text.ends_with("```\n"));
    }

    #[test]
    fn no_gpu_is_stated() {
        let mut snapshot = snapshot();
        snapshot.gpus.clear();
        snapshot.probes.clear();
        snapshot.notes.clear();

        let text = render_markdown(&snapshot);
        assert!(text.contains("## GPU\n\nNo GPU detected.\n"));
        assert!(!text.contains("## Notes"));
        assert!(text.ends_with("|\n"));
    }
}
