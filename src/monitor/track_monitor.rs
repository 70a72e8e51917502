//! The per-event monitor: classify, then fill the battery.

use serde::Serialize;

use crate::classifier::{EventClassification, TrackClassifier, TrackRecord};
use crate::config::MonitorConfig;
use crate::event::Event;
use crate::sink::{HistogramStore, RecordingSink};

use super::registry::{self, Scope, Tier};
use super::MonitorError;

/// Per-run processing totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Events handed to the monitor.
    pub events: u64,

    /// Events whose input collection was absent.
    pub events_skipped: u64,

    /// Tracks seen across all processed events.
    pub tracks: u64,

    /// Tracks passing the high-quality selection.
    pub high_quality_tracks: u64,
}

/// Books the histogram battery at construction and fills it per event.
///
/// The monitor owns the classifier and writes through an injected
/// [`RecordingSink`]; it holds no histogram handles of its own.
#[derive(Debug)]
pub struct TrackMonitor<S: RecordingSink> {
    config: MonitorConfig,
    classifier: TrackClassifier,
    sink: S,
    stats: RunStats,
}

impl TrackMonitor<HistogramStore> {
    /// Creates a monitor recording into a fresh in-memory store.
    pub fn with_store(config: MonitorConfig) -> Result<Self, MonitorError> {
        Self::new(config, HistogramStore::new())
    }
}

impl<S: RecordingSink> TrackMonitor<S> {
    /// Validates the configuration and books the battery into the sink.
    pub fn new(config: MonitorConfig, mut sink: S) -> Result<Self, MonitorError> {
        config.validate()?;
        registry::book_all(&mut sink, &config)?;

        let classifier = TrackClassifier::new(config.thresholds());
        Ok(Self {
            config,
            classifier,
            sink,
            stats: RunStats::default(),
        })
    }

    /// The monitor's configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Processing totals so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// The recording sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the monitor and hands back the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Processes one event.
    ///
    /// An absent input collection skips the event entirely: no per-track
    /// records, no event-level counts. A present but empty collection fills
    /// the multiplicity histograms with zeros.
    pub fn process_event(&mut self, event: &Event) -> Result<(), MonitorError> {
        self.stats.events += 1;

        let tracks = event.tracks(&self.config.tracks_tag);
        let Some(classification) = self.classifier.classify_event(tracks) else {
            tracing::debug!(
                run = event.run,
                event = event.event,
                tag = %self.config.tracks_tag,
                "Input collection absent, skipping event"
            );
            self.stats.events_skipped += 1;
            return Ok(());
        };

        self.fill(&classification)?;

        self.stats.tracks += u64::from(classification.summary.total);
        self.stats.high_quality_tracks += u64::from(classification.summary.high_quality);

        tracing::trace!(
            run = event.run,
            event = event.event,
            tracks = classification.summary.total,
            high_quality = classification.summary.high_quality,
            "Processed event"
        );
        Ok(())
    }

    /// Processes a sequence of events and returns the final totals.
    pub fn process_all<'a, I>(&mut self, events: I) -> Result<RunStats, MonitorError>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        for event in events {
            self.process_event(event)?;
        }
        Ok(self.stats)
    }

    fn fill(&mut self, classification: &EventClassification) -> Result<(), MonitorError> {
        for record in &classification.records {
            self.fill_track(record)?;
        }

        for def in registry::HISTOGRAMS
            .iter()
            .filter(|d| d.scope == Scope::PerEvent)
        {
            let count = def.tier.count(&classification.summary);
            self.sink.fill_1d(def.name, f64::from(count))?;
        }

        Ok(())
    }

    fn fill_track(&mut self, record: &TrackRecord) -> Result<(), MonitorError> {
        for def in registry::HISTOGRAMS
            .iter()
            .filter(|d| d.scope == Scope::PerTrack)
        {
            let applies = match def.tier {
                Tier::Untiered | Tier::AllTracks => true,
                Tier::HighQuality => record.high_quality,
            };
            if !applies {
                continue;
            }

            let Some(x) = def.x.quantity.track_value(record) else {
                continue;
            };
            match &def.y {
                None => self.sink.fill_1d(def.name, x)?,
                Some(y_spec) => {
                    let Some(y) = y_spec.quantity.track_value(record) else {
                        continue;
                    };
                    self.sink.fill_2d(def.name, x, y)?;
                }
            }
        }

        Ok(())
    }
}
