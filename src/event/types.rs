//! Input data types for per-event track collections.
//!
//! Events arrive as JSON records mapping collection tags to track lists.
//! All fields are read-only inputs; derived quantities live in the
//! classifier's per-track records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::zone::{Region, TrackerZone};

/// One event's worth of input data.
///
/// Track collections are keyed by string tags; the monitor resolves its
/// input collection by the configured tag. A missing tag means the
/// collection is absent for this event, which is distinct from a present
/// but empty collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Run number this event belongs to.
    pub run: u32,

    /// Luminosity section within the run.
    #[serde(default)]
    pub lumi: u32,

    /// Event number within the run.
    pub event: u64,

    /// Track collections keyed by tag.
    #[serde(default)]
    pub collections: BTreeMap<String, Vec<Track>>,
}

impl Event {
    /// Resolves a track collection by tag.
    ///
    /// Returns `None` when the collection is absent for this event.
    pub fn tracks(&self, tag: &str) -> Option<&[Track]> {
        self.collections.get(tag).map(Vec::as_slice)
    }
}

/// A reconstructed track candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Momentum vector at the reference point.
    pub momentum: Momentum,

    /// Point of closest approach to the beamline, in cm.
    pub poca: Poca,

    /// Trajectory-fit chi-square.
    pub chi2: f64,

    /// Trajectory-fit chi-square per degree of freedom.
    pub chi2_dof: f64,

    /// Stubs the trajectory fit was built from.
    pub stubs: Vec<Stub>,
}

/// Track momentum in collider coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Momentum {
    /// Transverse momentum in GeV.
    pub pt: f64,

    /// Azimuthal angle in radians.
    pub phi: f64,

    /// Pseudorapidity.
    pub eta: f64,
}

/// Point of closest approach to the beamline, in cm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Poca {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Poca {
    /// Radial distance from the beam axis (the transverse impact parameter).
    pub fn transverse_distance(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// A piece of hit evidence associated with a track.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stub {
    /// Numeric sub-detector code of the module the stub was recorded on.
    pub subdet: u32,
}

impl Stub {
    /// The tracker zone this stub sits in, if its code is recognized.
    pub fn zone(&self) -> Option<TrackerZone> {
        TrackerZone::from_code(self.subdet)
    }

    /// The barrel/endcap region this stub counts towards, if any.
    pub fn region(&self) -> Option<Region> {
        self.zone().map(TrackerZone::region)
    }
}
