//! File naming and formatting constants shared by recorders and the archive.

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const MODELS_PREFIX: &str = "models-";
pub const HARDWARE_DIR: &str = "hardware-specs";
pub const HARDWARE_PREFIX: &str = "hardware-";
pub const RESULTS_PREFIX: &str = "benchmark-results-";
pub const REPORT_PREFIX: &str = "benchmark-report-";

pub const MARKDOWN_EXT: &str = "md";
pub const JSON_EXT: &str = "json";

pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
