//! # Segment Module
//!
//! Segment metadata and the data conventions shared by the two pipelines:
//! the filename time-range suffix, the JSON sidecar manifest, and segment
//! discovery for the merger.

pub mod discovery;
pub mod manifest;
pub mod naming;

pub use discovery::{SegmentDiscovery, SegmentSource};
pub use manifest::{Manifest, ManifestEntry, MANIFEST_FILE};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A segment file and the `[start, end)` source range it was cut from.
///
/// Created at split time, consumed at merge time, immutable in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub path: PathBuf,
    pub start: f64,
    pub end: f64,
}

impl Segment {
    pub fn new<P: Into<PathBuf>>(path: P, start: f64, end: f64) -> Self {
        Self {
            path: path.into(),
            start,
            end,
        }
    }

    /// Length of the segment in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
