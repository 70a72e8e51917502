//! Event file ingestion.
//!
//! Events are stored one JSON object per line. Blank lines are skipped;
//! malformed lines surface as errors carrying the line number.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::SourceError;
use crate::event::Event;

/// A line-by-line reader of event records.
#[derive(Debug)]
pub struct EventSource {
    lines: Lines<BufReader<File>>,
    line: u64,
}

impl EventSource {
    /// Opens an event file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
            line: 0,
        })
    }
}

impl Iterator for EventSource {
    type Item = Result<Event, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(err) => return Some(Err(SourceError::Io(err))),
            };
            self.line += 1;

            if line.trim().is_empty() {
                continue;
            }

            return Some(
                serde_json::from_str(&line).map_err(|source| SourceError::Parse {
                    line: self.line,
                    source,
                }),
            );
        }
    }
}

/// Reads a whole event file into memory.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<Event>, SourceError> {
    EventSource::open(path)?.collect()
}
