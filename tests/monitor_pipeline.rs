//! End-to-end tests for the monitoring pipeline.
//!
//! Drives the config -> monitor -> events -> snapshot path the way the CLI
//! does, using files on disk.

use std::io::Write;

use trackmon::config::MonitorConfig;
use trackmon::export::{snapshot_to_string, Snapshot};
use trackmon::monitor::{TrackMonitor, HISTOGRAMS};
use trackmon::sink::Histogram;
use trackmon::source::read_events;

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
    path
}

fn track_json(stub_codes: &[u32], chi2: f64, chi2_dof: f64, pt: f64, eta: f64) -> String {
    let stubs: Vec<String> = stub_codes
        .iter()
        .map(|code| format!(r#"{{"subdet": {}}}"#, code))
        .collect();
    format!(
        r#"{{"momentum": {{"pt": {}, "phi": 0.3, "eta": {}}},
            "poca": {{"x": 0.3, "y": 0.4, "z": 1.0}},
            "chi2": {}, "chi2_dof": {}, "stubs": [{}]}}"#,
        pt,
        eta,
        chi2,
        chi2_dof,
        stubs.join(", ")
    )
    .replace('\n', " ")
}

#[test]
fn pipeline_processes_mixed_events() {
    let dir = tempfile::tempdir().expect("temp dir");

    let config_path = write_file(
        &dir,
        "monitor.yaml",
        "top_folder: DQM/OuterTracker\nmin_stubs: 5\nmax_chi2_dof: 10.0\n",
    );

    // One event with a high-quality and a low-quality track, one event with
    // an absent collection, one with an empty collection.
    let hq_track = track_json(&[3, 3, 3, 5, 6, 4], 48.0, 8.0, 30.0, 0.5);
    let lq_track = track_json(&[3, 5], 60.0, 30.0, 2.0, -1.8);
    let events_path = write_file(
        &dir,
        "events.jsonl",
        &format!(
            "{}\n{}\n{}\n",
            format!(
                r#"{{"run": 1, "event": 1, "collections": {{"l1_tracks": [{}, {}]}}}}"#,
                hq_track, lq_track
            ),
            r#"{"run": 1, "event": 2, "collections": {}}"#,
            r#"{"run": 1, "event": 3, "collections": {"l1_tracks": []}}"#,
        ),
    );

    let config = MonitorConfig::from_file(&config_path).expect("config loads");
    let mut monitor = TrackMonitor::with_store(config).expect("monitor builds");

    let events = read_events(&events_path).expect("events load");
    let stats = monitor.process_all(&events).expect("processing succeeds");

    assert_eq!(stats.events, 3);
    assert_eq!(stats.events_skipped, 1);
    assert_eq!(stats.tracks, 2);
    assert_eq!(stats.high_quality_tracks, 1);

    let store = monitor.into_sink();
    assert_eq!(store.len(), HISTOGRAMS.len());

    // Two events filled the event-level multiplicities; the absent one
    // contributed nothing at all.
    let track_n = store.get("track_n").expect("booked");
    assert_eq!(track_n.entries(), 2);

    // Both tracks land in the inclusive tier, only one in the HQ tier.
    assert_eq!(store.get("track_all_pt").expect("booked").entries(), 2);
    assert_eq!(store.get("track_hq_pt").expect("booked").entries(), 1);
    assert_eq!(
        store
            .get("track_hq_endcap_stubs_vs_eta")
            .expect("booked")
            .entries(),
        1
    );

    // Folders follow the configured top folder.
    assert_eq!(
        store.get("track_hq_pt").expect("booked").folder(),
        "DQM/OuterTracker/Tracks/HQ"
    );
}

#[test]
fn pipeline_counts_land_in_expected_bins() {
    let dir = tempfile::tempdir().expect("temp dir");

    let hq_track = track_json(&[3, 3, 3, 5, 6], 10.0, 2.5, 30.0, 0.5);
    let events_path = write_file(
        &dir,
        "events.jsonl",
        &format!(
            r#"{{"run": 7, "event": 1, "collections": {{"l1_tracks": [{}]}}}}"#,
            hq_track
        ),
    );

    let config = MonitorConfig::default().with_min_stubs(5);
    let mut monitor = TrackMonitor::with_store(config).expect("monitor builds");
    let events = read_events(&events_path).expect("events load");
    monitor.process_all(&events).expect("processing succeeds");

    let store = monitor.into_sink();

    // Five stubs land in the bin centered on 5 (axis starts at -0.5).
    let Histogram::OneDim(nstubs) = store.get("track_nstubs").expect("booked") else {
        panic!("track_nstubs is 1-D");
    };
    assert_eq!(nstubs.bin_count(5), 1);
    assert_eq!(nstubs.entries, 1);

    // One track in this event: multiplicity bin 1.
    let Histogram::OneDim(track_n) = store.get("track_n").expect("booked") else {
        panic!("track_n is 1-D");
    };
    assert_eq!(track_n.bin_count(1), 1);

    // The HQ count histogram also saw exactly one track.
    let Histogram::OneDim(hq_n) = store.get("track_hq_n").expect("booked") else {
        panic!("track_hq_n is 1-D");
    };
    assert_eq!(hq_n.bin_count(1), 1);
}

#[test]
fn snapshot_export_round_trips_through_json() {
    let config = MonitorConfig::default();
    let monitor = TrackMonitor::with_store(config).expect("monitor builds");

    let snapshot = Snapshot::from_store(monitor.sink());
    let json = snapshot_to_string(&snapshot).expect("serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

    let histograms = value["histograms"].as_array().expect("array");
    assert_eq!(histograms.len(), HISTOGRAMS.len());

    // Snapshots are name-ordered and tag their dimensionality.
    let names: Vec<&str> = histograms
        .iter()
        .map(|h| h["name"].as_str().expect("name"))
        .collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);

    let eta_vs_nstubs = histograms
        .iter()
        .find(|h| h["name"] == "track_nstubs_vs_eta")
        .expect("present");
    assert_eq!(eta_vs_nstubs["dimensions"], "2d");
}
