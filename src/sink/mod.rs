//! Recording sink: named histogram accumulators.
//!
//! The sink is the one collaborator the monitor writes to. Histograms are
//! booked once at startup and filled per track or per event; storage and
//! rendering beyond the in-memory accumulators live downstream of the
//! exported snapshots.

mod histogram;
mod store;

pub use histogram::{Axis, Hist1D, Hist2D, Histogram};
pub use store::{HistogramStore, RecordingSink};
