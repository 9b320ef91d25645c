//! # Domain Models
//!
//! Pure data types for the archive: model inventories, hardware snapshots, benchmark
//! records and configuration. Dependencies are limited to `serde` and `chrono`.
//! Keep it lean: no I/O, no process spawning, just data and small helpers.

pub mod bench;
pub mod config;
pub mod constants;
pub mod hardware;
pub mod inventory;

/// Rounds to two decimal places, the precision used for every stored metric.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
