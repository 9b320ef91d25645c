//! # Model Inventory
//!
//! The model half of the Snapshot Recorder: runs `ollama list`, turns the table into
//! [`ModelInventory`](lmarc_domain::inventory::ModelInventory) entries, renders the dated
//! markdown snapshot and compares two snapshots.

mod diff;
mod error;
mod listing;
mod markdown;
mod recorder;

pub use crate::diff::{InventoryDiff, Resized, diff};
pub use crate::error::{InventoryError, InventoryErrorExt};
pub use crate::listing::{infer_purpose, parse_listing};
pub use crate::markdown::{parse_markdown, render_markdown};
pub use crate::recorder::InventoryRecorder;
