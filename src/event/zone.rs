//! Tracker sub-detector zones and their grouping into barrel/endcap regions.

use serde::{Deserialize, Serialize};

/// The four recognized tracker zones a stub can sit in.
///
/// Zones are identified in the event data by numeric sub-detector codes;
/// codes outside the recognized set map to no zone at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerZone {
    /// Inner barrel layers (code 3).
    InnerBarrel,
    /// Inner disks (code 4).
    InnerDisk,
    /// Outer barrel layers (code 5).
    OuterBarrel,
    /// Endcap disks (code 6).
    Endcap,
}

impl TrackerZone {
    /// Maps a numeric sub-detector code to a zone.
    ///
    /// Returns `None` for codes that do not belong to the strip tracker
    /// (e.g. pixel codes); stubs carrying such codes are counted in
    /// neither region.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            3 => Some(TrackerZone::InnerBarrel),
            4 => Some(TrackerZone::InnerDisk),
            5 => Some(TrackerZone::OuterBarrel),
            6 => Some(TrackerZone::Endcap),
            _ => None,
        }
    }

    /// The logical region this zone belongs to.
    pub fn region(self) -> Region {
        match self {
            TrackerZone::InnerBarrel | TrackerZone::OuterBarrel => Region::Barrel,
            TrackerZone::InnerDisk | TrackerZone::Endcap => Region::Endcap,
        }
    }
}

/// Broad detector geometry regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Barrel,
    Endcap,
}
