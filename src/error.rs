//! Error types for trackmon operations.
//!
//! Defines error types for the major subsystems:
//! - Histogram booking and filling (recording sink)
//! - Event file ingestion
//! - Snapshot export

use thiserror::Error;

/// Errors that can occur while booking or filling histograms.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Histogram '{0}' is already booked")]
    DuplicateName(String),

    #[error("Histogram '{0}' is not booked")]
    NotBooked(String),

    #[error("Histogram '{name}' is {actual}-dimensional, filled as {requested}-dimensional")]
    DimensionMismatch {
        name: String,
        actual: u8,
        requested: u8,
    },

    #[error("Invalid axis for histogram '{name}': {reason}")]
    InvalidAxis { name: String, reason: String },
}

/// Errors that can occur while reading an event file.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed event record at line {line}: {source}")]
    Parse {
        line: u64,
        source: serde_json::Error,
    },
}

/// Errors that can occur while exporting a histogram snapshot.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
