//! Track-quality classification.
//!
//! Provides the per-track derived record, the high-quality selection, and
//! the per-event aggregate counts.

mod chi2;
mod quality;

pub use chi2::chi_squared_probability;
pub use quality::{
    ClassifierThresholds, EventClassification, EventSummary, TrackClassifier, TrackRecord,
};
