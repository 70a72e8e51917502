//! The recording-sink trait and its in-memory implementation.

use std::collections::BTreeMap;

use crate::error::SinkError;

use super::histogram::{Axis, Hist1D, Hist2D, Histogram};

/// Where classification results get recorded.
///
/// Histograms are booked by name once at startup, then filled per track or
/// per event. Implementors own the name-to-accumulator mapping so callers
/// never hold histogram handles themselves.
pub trait RecordingSink {
    /// Books a 1-D histogram under the given folder.
    fn book_1d(
        &mut self,
        name: &str,
        folder: &str,
        x: Axis,
        count_label: &str,
    ) -> Result<(), SinkError>;

    /// Books a 2-D histogram under the given folder.
    fn book_2d(
        &mut self,
        name: &str,
        folder: &str,
        x: Axis,
        y: Axis,
        count_label: &str,
    ) -> Result<(), SinkError>;

    /// Accumulates one observation into a booked 1-D histogram.
    fn fill_1d(&mut self, name: &str, value: f64) -> Result<(), SinkError>;

    /// Accumulates one (x, y) observation into a booked 2-D histogram.
    fn fill_2d(&mut self, name: &str, x_value: f64, y_value: f64) -> Result<(), SinkError>;
}

/// In-memory histogram store with deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct HistogramStore {
    histograms: BTreeMap<String, Histogram>,
}

impl HistogramStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of booked histograms.
    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    /// Whether nothing is booked yet.
    pub fn is_empty(&self) -> bool {
        self.histograms.is_empty()
    }

    /// Looks up a booked histogram by name.
    pub fn get(&self, name: &str) -> Option<&Histogram> {
        self.histograms.get(name)
    }

    /// Iterates booked histograms in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Histogram> {
        self.histograms.values()
    }

    fn check_axis(name: &str, which: &str, axis: &Axis) -> Result<(), SinkError> {
        if axis.is_valid() {
            Ok(())
        } else {
            Err(SinkError::InvalidAxis {
                name: name.to_string(),
                reason: format!(
                    "{} axis: bins = {}, range = [{}, {})",
                    which, axis.bins, axis.min, axis.max
                ),
            })
        }
    }

    fn check_vacant(&self, name: &str) -> Result<(), SinkError> {
        if self.histograms.contains_key(name) {
            Err(SinkError::DuplicateName(name.to_string()))
        } else {
            Ok(())
        }
    }
}

impl RecordingSink for HistogramStore {
    fn book_1d(
        &mut self,
        name: &str,
        folder: &str,
        x: Axis,
        count_label: &str,
    ) -> Result<(), SinkError> {
        self.check_vacant(name)?;
        Self::check_axis(name, "x", &x)?;

        tracing::debug!(name = name, folder = folder, "Booked 1-D histogram");
        self.histograms.insert(
            name.to_string(),
            Histogram::OneDim(Hist1D::new(name, folder, x, count_label)),
        );
        Ok(())
    }

    fn book_2d(
        &mut self,
        name: &str,
        folder: &str,
        x: Axis,
        y: Axis,
        count_label: &str,
    ) -> Result<(), SinkError> {
        self.check_vacant(name)?;
        Self::check_axis(name, "x", &x)?;
        Self::check_axis(name, "y", &y)?;

        tracing::debug!(name = name, folder = folder, "Booked 2-D histogram");
        self.histograms.insert(
            name.to_string(),
            Histogram::TwoDim(Hist2D::new(name, folder, x, y, count_label)),
        );
        Ok(())
    }

    fn fill_1d(&mut self, name: &str, value: f64) -> Result<(), SinkError> {
        match self.histograms.get_mut(name) {
            None => Err(SinkError::NotBooked(name.to_string())),
            Some(Histogram::TwoDim(_)) => Err(SinkError::DimensionMismatch {
                name: name.to_string(),
                actual: 2,
                requested: 1,
            }),
            Some(Histogram::OneDim(hist)) => {
                hist.fill(value);
                Ok(())
            }
        }
    }

    fn fill_2d(&mut self, name: &str, x_value: f64, y_value: f64) -> Result<(), SinkError> {
        match self.histograms.get_mut(name) {
            None => Err(SinkError::NotBooked(name.to_string())),
            Some(Histogram::OneDim(_)) => Err(SinkError::DimensionMismatch {
                name: name.to_string(),
                actual: 1,
                requested: 2,
            }),
            Some(Histogram::TwoDim(hist)) => {
                hist.fill(x_value, y_value);
                Ok(())
            }
        }
    }
}
