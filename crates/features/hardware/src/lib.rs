//! # Hardware Snapshots
//!
//! The hardware half of the Snapshot Recorder. Structured facts come from `sysinfo`
//! and `nvidia-smi`; anything else the user cares about is captured by configured
//! probe commands whose output is transcribed verbatim.

mod error;
mod gpu;
mod host;
mod markdown;
mod recorder;

pub use crate::error::{HardwareError, HardwareErrorExt};
pub use crate::gpu::parse_gpu_csv;
pub use crate::host::collect_host;
pub use crate::markdown::render_markdown;
pub use crate::recorder::HardwareRecorder;
