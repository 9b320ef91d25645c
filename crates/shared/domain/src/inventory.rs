use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One installed model as reported by the model-serving tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Size on disk in GB, when the listing carried one.
    #[serde(default)]
    pub size_gb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// Free-text purpose inferred from the model name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl ModelEntry {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), id: None, size_gb: None, modified: None, purpose: None }
    }
}

/// All models installed on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInventory {
    pub taken_on: NaiveDate,
    pub entries: Vec<ModelEntry>,
    /// The listing exactly as the tool printed it.
    #[serde(default)]
    pub raw_listing: String,
}

impl ModelInventory {
    #[must_use]
    pub const fn new(taken_on: NaiveDate, entries: Vec<ModelEntry>) -> Self {
        Self { taken_on, entries, raw_listing: String::new() }
    }

    #[must_use]
    pub fn total_size_gb(&self) -> f64 {
        self.entries.iter().filter_map(|entry| entry.size_gb).sum()
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
