//! # Report Composer
//!
//! Turns a [`BenchmarkRun`](lmarc_domain::bench::BenchmarkRun) into the console
//! summary printed after a run and the dated markdown report kept in the archive.
//! Rendering is pure: no I/O, no clock.

mod markdown;
mod records;
mod summary;

pub use crate::markdown::render_report;
pub use crate::records::{BenchmarkRecord, records, silent, unsuccessful};
pub use crate::summary::render_summary;
