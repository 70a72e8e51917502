//! Histogram snapshot export.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ExportError;
use crate::sink::{Histogram, HistogramStore};

/// A serializable view of every booked histogram at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,

    /// Booked histograms in name order.
    pub histograms: Vec<Histogram>,
}

impl Snapshot {
    /// Captures the current contents of a store.
    pub fn from_store(store: &HistogramStore) -> Self {
        Self {
            created_at: Utc::now(),
            histograms: store.iter().cloned().collect(),
        }
    }
}

/// Serializes a snapshot as pretty-printed JSON.
pub fn snapshot_to_string(snapshot: &Snapshot) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Writes a snapshot to a JSON file.
pub fn write_snapshot(snapshot: &Snapshot, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let contents = snapshot_to_string(snapshot)?;
    std::fs::write(path.as_ref(), contents)?;
    tracing::info!(path = %path.as_ref().display(), "Wrote histogram snapshot");
    Ok(())
}
