//! Per-track quality classification and per-event aggregates.

use serde::Serialize;

use crate::event::{Region, Track};

use super::chi2::chi_squared_probability;

/// Selection thresholds for the high-quality tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierThresholds {
    /// Minimum number of stubs a high-quality track must carry.
    pub min_stubs: u32,

    /// Maximum chi-square per degree of freedom a high-quality track may have.
    pub max_chi2_dof: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            min_stubs: 4,
            max_chi2_dof: 10.0,
        }
    }
}

/// Derived quantities for one track, recomputed from scratch every event.
#[derive(Debug, Clone, Serialize)]
pub struct TrackRecord {
    /// Position of the track in the input collection.
    pub index: usize,

    /// Number of stubs on the track.
    pub n_stubs: u32,

    /// Stubs sitting in barrel zones.
    pub n_barrel_stubs: u32,

    /// Stubs sitting in endcap zones.
    pub n_endcap_stubs: u32,

    /// Transverse momentum in GeV.
    pub pt: f64,

    /// Azimuthal angle in radians.
    pub phi: f64,

    /// Pseudorapidity.
    pub eta: f64,

    /// z of the point of closest approach, in cm.
    pub vtx_z: f64,

    /// Transverse impact parameter in cm.
    pub d0: f64,

    /// Trajectory-fit chi-square.
    pub chi2: f64,

    /// Trajectory-fit chi-square per degree of freedom.
    pub chi2_dof: f64,

    /// Right-tail chi-square probability at dof = stub count.
    pub chi2_probability: f64,

    /// Whether the track passes the high-quality selection.
    pub high_quality: bool,
}

/// Per-event track counts.
///
/// `all_tracks` is inclusive: every track is counted there regardless of
/// quality, so it always equals `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventSummary {
    /// Tracks seen in the collection.
    pub total: u32,

    /// Tracks passing the high-quality selection.
    pub high_quality: u32,

    /// Tracks counted in the inclusive all-tracks tier.
    pub all_tracks: u32,
}

/// The classifier's output for one event.
#[derive(Debug, Clone, Serialize)]
pub struct EventClassification {
    /// One record per track, in input order.
    pub records: Vec<TrackRecord>,

    /// Aggregate counts over the collection.
    pub summary: EventSummary,
}

/// Classifies track candidates into quality tiers.
///
/// The classifier is stateless: re-running it on the same input with the
/// same thresholds produces identical records and counts.
#[derive(Debug, Clone, Default)]
pub struct TrackClassifier {
    thresholds: ClassifierThresholds,
}

impl TrackClassifier {
    /// Creates a classifier with the given thresholds.
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    /// The thresholds this classifier selects with.
    pub fn thresholds(&self) -> ClassifierThresholds {
        self.thresholds
    }

    /// Computes the derived record for a single track.
    pub fn classify_track(&self, index: usize, track: &Track) -> TrackRecord {
        let n_stubs = track.stubs.len() as u32;

        let mut n_barrel_stubs = 0;
        let mut n_endcap_stubs = 0;
        for stub in &track.stubs {
            match stub.region() {
                Some(Region::Barrel) => n_barrel_stubs += 1,
                Some(Region::Endcap) => n_endcap_stubs += 1,
                None => {}
            }
        }

        let high_quality =
            n_stubs >= self.thresholds.min_stubs && track.chi2_dof <= self.thresholds.max_chi2_dof;

        TrackRecord {
            index,
            n_stubs,
            n_barrel_stubs,
            n_endcap_stubs,
            pt: track.momentum.pt,
            phi: track.momentum.phi,
            eta: track.momentum.eta,
            vtx_z: track.poca.z,
            d0: track.poca.transverse_distance(),
            chi2: track.chi2,
            chi2_dof: track.chi2_dof,
            chi2_probability: chi_squared_probability(track.chi2, n_stubs),
            high_quality,
        }
    }

    /// Classifies a whole event's collection.
    ///
    /// An absent collection (`None`) yields `None`: the event contributes
    /// nothing, not even zero counts. A present but empty collection yields
    /// an empty record list with zeroed counts.
    pub fn classify_event(&self, tracks: Option<&[Track]>) -> Option<EventClassification> {
        let tracks = tracks?;

        let mut summary = EventSummary::default();
        let mut records = Vec::with_capacity(tracks.len());

        for (index, track) in tracks.iter().enumerate() {
            let record = self.classify_track(index, track);

            summary.total += 1;
            if record.high_quality {
                summary.high_quality += 1;
            }
            // Inclusive tier: every track lands here, high-quality included.
            summary.all_tracks += 1;

            records.push(record);
        }

        Some(EventClassification { records, summary })
    }
}
