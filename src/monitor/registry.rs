//! The declarative histogram battery.
//!
//! Every histogram the monitor fills is one row in [`HISTOGRAMS`]: name,
//! tier, scope, observables, binning-set keys, and axis labels. A single
//! generic routine books the whole battery against a configuration, so
//! adding a histogram means adding a row, not writing registration code.

use crate::classifier::{EventSummary, TrackRecord};
use crate::config::MonitorConfig;
use crate::sink::{Axis, RecordingSink};

use super::MonitorError;

/// Quality tier a histogram belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Filled for every track with no tier sub-folder.
    Untiered,

    /// The inclusive tier: every track regardless of quality.
    AllTracks,

    /// Tracks passing the high-quality selection.
    HighQuality,
}

impl Tier {
    /// Sub-folder component under `<top_folder>/Tracks`, if any.
    pub fn subfolder(self) -> Option<&'static str> {
        match self {
            Tier::Untiered => None,
            Tier::AllTracks => Some("All"),
            Tier::HighQuality => Some("HQ"),
        }
    }

    /// The tier's track count from an event summary.
    pub fn count(self, summary: &EventSummary) -> u32 {
        match self {
            Tier::Untiered => summary.total,
            Tier::AllTracks => summary.all_tracks,
            Tier::HighQuality => summary.high_quality,
        }
    }
}

/// Whether a histogram is filled once per track or once per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    PerTrack,
    PerEvent,
}

/// Observables a histogram axis can be filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Per-event track count (per-event scope only).
    NTracks,
    NStubs,
    Pt,
    Eta,
    Phi,
    VtxZ,
    D0,
    Chi2,
    Chi2PerDof,
    Chi2Probability,
    BarrelStubs,
    EndcapStubs,
}

impl Quantity {
    /// Extracts this observable from a per-track record.
    ///
    /// Returns `None` for [`Quantity::NTracks`], which only exists at event
    /// scope.
    pub fn track_value(self, record: &TrackRecord) -> Option<f64> {
        match self {
            Quantity::NTracks => None,
            Quantity::NStubs => Some(f64::from(record.n_stubs)),
            Quantity::Pt => Some(record.pt),
            Quantity::Eta => Some(record.eta),
            Quantity::Phi => Some(record.phi),
            Quantity::VtxZ => Some(record.vtx_z),
            Quantity::D0 => Some(record.d0),
            Quantity::Chi2 => Some(record.chi2),
            Quantity::Chi2PerDof => Some(record.chi2_dof),
            Quantity::Chi2Probability => Some(record.chi2_probability),
            Quantity::BarrelStubs => Some(f64::from(record.n_barrel_stubs)),
            Quantity::EndcapStubs => Some(f64::from(record.n_endcap_stubs)),
        }
    }
}

/// One axis of a histogram definition.
#[derive(Debug, Clone, Copy)]
pub struct AxisSpec {
    /// Observable filled on this axis.
    pub quantity: Quantity,

    /// Key of the binning set in the monitor configuration.
    pub binning: &'static str,

    /// Axis label.
    pub label: &'static str,
}

/// One histogram in the battery.
#[derive(Debug, Clone, Copy)]
pub struct HistogramDef {
    /// Unique histogram name.
    pub name: &'static str,

    /// Quality tier.
    pub tier: Tier,

    /// Fill scope.
    pub scope: Scope,

    /// The x axis.
    pub x: AxisSpec,

    /// The y axis, for 2-D histograms.
    pub y: Option<AxisSpec>,

    /// Label for the bin-count axis.
    pub count_label: &'static str,
}

const N_TRACKS_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::NTracks,
    binning: "n_tracks",
    label: "# tracks",
};

const N_STUBS_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::NStubs,
    binning: "n_stubs",
    label: "# stubs",
};

const PT_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::Pt,
    binning: "pt",
    label: "pT [GeV]",
};

const ETA_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::Eta,
    binning: "eta",
    label: "eta",
};

const PHI_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::Phi,
    binning: "phi",
    label: "phi [rad]",
};

const VTX_Z_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::VtxZ,
    binning: "vtx_z",
    label: "vertex z [cm]",
};

const D0_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::D0,
    binning: "d0",
    label: "d0 [cm]",
};

const CHI2_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::Chi2,
    binning: "chi2",
    label: "chi^2",
};

const CHI2_DOF_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::Chi2PerDof,
    binning: "chi2_dof",
    label: "chi^2 / ndf",
};

const CHI2_PROB_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::Chi2Probability,
    binning: "chi2_prob",
    label: "chi^2 probability",
};

const BARREL_STUBS_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::BarrelStubs,
    binning: "n_stubs",
    label: "# barrel stubs",
};

const ENDCAP_STUBS_AXIS: AxisSpec = AxisSpec {
    quantity: Quantity::EndcapStubs,
    binning: "n_stubs",
    label: "# endcap stubs",
};

const fn per_event(name: &'static str, tier: Tier) -> HistogramDef {
    HistogramDef {
        name,
        tier,
        scope: Scope::PerEvent,
        x: N_TRACKS_AXIS,
        y: None,
        count_label: "# events",
    }
}

const fn per_track_1d(name: &'static str, tier: Tier, x: AxisSpec) -> HistogramDef {
    HistogramDef {
        name,
        tier,
        scope: Scope::PerTrack,
        x,
        y: None,
        count_label: "# tracks",
    }
}

const fn per_track_2d(name: &'static str, tier: Tier, x: AxisSpec, y: AxisSpec) -> HistogramDef {
    HistogramDef {
        name,
        tier,
        scope: Scope::PerTrack,
        x,
        y: Some(y),
        count_label: "# tracks",
    }
}

/// The full histogram battery.
pub const HISTOGRAMS: &[HistogramDef] = &[
    // Untiered
    per_event("track_n", Tier::Untiered),
    per_track_1d("track_nstubs", Tier::Untiered, N_STUBS_AXIS),
    per_track_2d("track_nstubs_vs_eta", Tier::Untiered, ETA_AXIS, N_STUBS_AXIS),
    // Inclusive all-tracks tier
    per_event("track_all_n", Tier::AllTracks),
    per_track_1d("track_all_pt", Tier::AllTracks, PT_AXIS),
    per_track_1d("track_all_eta", Tier::AllTracks, ETA_AXIS),
    per_track_1d("track_all_phi", Tier::AllTracks, PHI_AXIS),
    per_track_1d("track_all_vtx_z", Tier::AllTracks, VTX_Z_AXIS),
    per_track_1d("track_all_d0", Tier::AllTracks, D0_AXIS),
    per_track_1d("track_all_chi2", Tier::AllTracks, CHI2_AXIS),
    per_track_1d("track_all_chi2_dof", Tier::AllTracks, CHI2_DOF_AXIS),
    per_track_1d("track_all_chi2_prob", Tier::AllTracks, CHI2_PROB_AXIS),
    per_track_2d(
        "track_all_chi2_dof_vs_nstubs",
        Tier::AllTracks,
        N_STUBS_AXIS,
        CHI2_DOF_AXIS,
    ),
    per_track_2d(
        "track_all_chi2_dof_vs_eta",
        Tier::AllTracks,
        ETA_AXIS,
        CHI2_DOF_AXIS,
    ),
    per_track_2d(
        "track_all_barrel_stubs_vs_eta",
        Tier::AllTracks,
        ETA_AXIS,
        BARREL_STUBS_AXIS,
    ),
    per_track_2d(
        "track_all_endcap_stubs_vs_eta",
        Tier::AllTracks,
        ETA_AXIS,
        ENDCAP_STUBS_AXIS,
    ),
    // High-quality tier
    per_event("track_hq_n", Tier::HighQuality),
    per_track_1d("track_hq_pt", Tier::HighQuality, PT_AXIS),
    per_track_1d("track_hq_eta", Tier::HighQuality, ETA_AXIS),
    per_track_1d("track_hq_phi", Tier::HighQuality, PHI_AXIS),
    per_track_1d("track_hq_vtx_z", Tier::HighQuality, VTX_Z_AXIS),
    per_track_1d("track_hq_d0", Tier::HighQuality, D0_AXIS),
    per_track_1d("track_hq_chi2", Tier::HighQuality, CHI2_AXIS),
    per_track_1d("track_hq_chi2_dof", Tier::HighQuality, CHI2_DOF_AXIS),
    per_track_1d("track_hq_chi2_prob", Tier::HighQuality, CHI2_PROB_AXIS),
    per_track_2d(
        "track_hq_chi2_dof_vs_nstubs",
        Tier::HighQuality,
        N_STUBS_AXIS,
        CHI2_DOF_AXIS,
    ),
    per_track_2d(
        "track_hq_chi2_dof_vs_eta",
        Tier::HighQuality,
        ETA_AXIS,
        CHI2_DOF_AXIS,
    ),
    per_track_2d(
        "track_hq_barrel_stubs_vs_eta",
        Tier::HighQuality,
        ETA_AXIS,
        BARREL_STUBS_AXIS,
    ),
    per_track_2d(
        "track_hq_endcap_stubs_vs_eta",
        Tier::HighQuality,
        ETA_AXIS,
        ENDCAP_STUBS_AXIS,
    ),
];

impl HistogramDef {
    /// The folder this histogram is booked under.
    pub fn folder(&self, top_folder: &str) -> String {
        match self.tier.subfolder() {
            None => format!("{}/Tracks", top_folder),
            Some(sub) => format!("{}/Tracks/{}", top_folder, sub),
        }
    }
}

fn resolve_axis(spec: &AxisSpec, config: &MonitorConfig) -> Result<Axis, MonitorError> {
    let binning = config.axis(spec.binning)?;
    Ok(Axis::new(spec.label, binning.bins, binning.min, binning.max))
}

/// Books the whole battery into a sink.
///
/// # Errors
///
/// Fails when a definition references a binning set the configuration does
/// not define, or when the sink rejects a booking.
pub fn book_all<S: RecordingSink>(sink: &mut S, config: &MonitorConfig) -> Result<(), MonitorError> {
    for def in HISTOGRAMS {
        let folder = def.folder(&config.top_folder);
        let x = resolve_axis(&def.x, config)?;
        match &def.y {
            None => sink.book_1d(def.name, &folder, x, def.count_label)?,
            Some(y_spec) => {
                let y = resolve_axis(y_spec, config)?;
                sink.book_2d(def.name, &folder, x, y, def.count_label)?;
            }
        }
    }

    tracing::info!(
        histograms = HISTOGRAMS.len(),
        folder = %config.top_folder,
        "Booked histogram battery"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::HistogramStore;
    use std::collections::BTreeSet;

    #[test]
    fn test_names_are_unique() {
        let names: BTreeSet<&str> = HISTOGRAMS.iter().map(|def| def.name).collect();
        assert_eq!(names.len(), HISTOGRAMS.len());
    }

    #[test]
    fn test_battery_layout() {
        assert_eq!(HISTOGRAMS.len(), 29);

        let untiered = HISTOGRAMS
            .iter()
            .filter(|d| d.tier == Tier::Untiered)
            .count();
        let all = HISTOGRAMS
            .iter()
            .filter(|d| d.tier == Tier::AllTracks)
            .count();
        let hq = HISTOGRAMS
            .iter()
            .filter(|d| d.tier == Tier::HighQuality)
            .count();
        assert_eq!(untiered, 3);
        assert_eq!(all, 13);
        assert_eq!(hq, 13);

        let per_event = HISTOGRAMS
            .iter()
            .filter(|d| d.scope == Scope::PerEvent)
            .count();
        assert_eq!(per_event, 3);
    }

    #[test]
    fn test_per_event_entries_are_track_counts() {
        for def in HISTOGRAMS.iter().filter(|d| d.scope == Scope::PerEvent) {
            assert_eq!(def.x.quantity, Quantity::NTracks);
            assert!(def.y.is_none());
        }
    }

    #[test]
    fn test_default_config_resolves_every_binning_key() {
        let config = MonitorConfig::default();
        for def in HISTOGRAMS {
            assert!(
                config.axis(def.x.binning).is_ok(),
                "missing binning set '{}'",
                def.x.binning
            );
            if let Some(y) = &def.y {
                assert!(
                    config.axis(y.binning).is_ok(),
                    "missing binning set '{}'",
                    y.binning
                );
            }
        }
    }

    #[test]
    fn test_book_all_against_default_config() {
        let config = MonitorConfig::default();
        let mut store = HistogramStore::new();
        book_all(&mut store, &config).expect("booking succeeds");
        assert_eq!(store.len(), HISTOGRAMS.len());

        let hist = store.get("track_hq_pt").expect("booked");
        assert_eq!(hist.folder(), "Tracker/L1Tracks/Tracks/HQ");

        let hist = store.get("track_nstubs").expect("booked");
        assert_eq!(hist.folder(), "Tracker/L1Tracks/Tracks");

        let hist = store.get("track_all_eta").expect("booked");
        assert_eq!(hist.folder(), "Tracker/L1Tracks/Tracks/All");
    }

    #[test]
    fn test_book_all_reports_unknown_binning() {
        let mut config = MonitorConfig::default();
        config.binning.remove("pt");

        let mut store = HistogramStore::new();
        let err = book_all(&mut store, &config).expect_err("missing binning detected");
        assert!(matches!(
            err,
            MonitorError::Config(crate::config::ConfigError::UnknownBinning(key)) if key == "pt"
        ));
    }

    #[test]
    fn test_tier_counts() {
        let summary = EventSummary {
            total: 7,
            high_quality: 3,
            all_tracks: 7,
        };
        assert_eq!(Tier::Untiered.count(&summary), 7);
        assert_eq!(Tier::AllTracks.count(&summary), 7);
        assert_eq!(Tier::HighQuality.count(&summary), 3);
    }
}
