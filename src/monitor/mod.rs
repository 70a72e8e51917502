//! The per-event track monitor and its histogram battery.

mod registry;
mod track_monitor;

use thiserror::Error;

pub use registry::{book_all, AxisSpec, HistogramDef, Quantity, Scope, Tier, HISTOGRAMS};
pub use track_monitor::{RunStats, TrackMonitor};

use crate::config::ConfigError;
use crate::error::SinkError;

/// Errors that can occur while constructing or running the monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Recording sink error: {0}")]
    Sink(#[from] SinkError),
}
