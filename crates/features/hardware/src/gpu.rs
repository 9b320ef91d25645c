use lmarc_domain::hardware::GpuInfo;

pub(crate) const NVIDIA_SMI: &str = "nvidia-smi";
pub(crate) const QUERY_ARGS: [&str; 2] =
    ["--query-gpu=name,driver_version,memory.total", "--format=csv,noheader,nounits"];

/// Parses `nvidia-smi` CSV output, one GPU per line: `name, driver, memory MiB`.
///
/// The name is taken as everything before the last two commas so names containing
/// commas survive. Fields reported as `[N/A]` become `None`.
#[must_use]
pub fn parse_gpu_csv(stdout: &str) -> Vec<GpuInfo> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut fields = line.rsplitn(3, ',').map(str::trim);
            let memory = fields.next()?;
            let driver = fields.next();
            let name = fields.next();

            let (name, driver, memory) = match (name, driver) {
                (Some(name), Some(driver)) => (name, Some(driver), Some(memory)),
                // Fewer columns than queried: keep what identifies the device.
                _ => (line, None, None),
            };
            if name.is_empty() {
                return None;
            }

            Some(GpuInfo {
                name: name.to_owned(),
                driver_version: driver.filter(|d| is_known(d)).map(str::to_owned),
                memory_mb: memory.and_then(|m| m.parse().ok()),
            })
        })
        .collect()
}

fn is_known(value: &str) -> bool {
    !value.is_empty() && !value.eq_ignore_ascii_case("[N/A]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_gpu_per_line() {
        let gpus = parse_gpu_csv(
            "NVIDIA GeForce RTX 4090, 550.54.14, 24564\nNVIDIA RTX A2000, 550.54.14, 6138\n",
        );
        assert_eq!(gpus.len(), 2);
        assert_eq!(gpus[0].name, "NVIDIA GeForce RTX 4090");
        assert_eq!(gpus[0].driver_version.as_deref(), Some("550.54.14"));
        assert_eq!(gpus[0].memory_mb, Some(24564));
        assert_eq!(gpus[1].memory_mb, Some(6138));
    }

    #[test]
    fn unknown_fields_become_none() {
        let gpus = parse_gpu_csv("Tesla T4, [N/A], [N/A]\n");
        assert_eq!(gpus[0].name, "Tesla T4");
        assert_eq!(gpus[0].driver_version, None);
        assert_eq!(gpus[0].memory_mb, None);
    }

    #[test]
    fn commas_in_names_and_short_lines() {
        let gpus = parse_gpu_csv("Odd, Name GPU, 535.1, 8192\nBare Device\n\n");
        assert_eq!(gpus[0].name, "Odd, Name GPU");
        assert_eq!(gpus[1].name, "Bare Device");
        assert_eq!(gpus[1].memory_mb, None);
    }
}
