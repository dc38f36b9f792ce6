use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SegmentError};
use crate::segment::Segment;

/// File name of the sidecar manifest written next to the segment files.
pub const MANIFEST_FILE: &str = "segments.json";

/// JSON sidecar listing the segments produced by one split run.
///
/// Filename-embedded time ranges are a fragile implicit schema, so the
/// splitter also records them here explicitly. The merger prefers the
/// manifest and falls back to filename parsing for segments produced
/// elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Source video the segments were cut from
    pub source: PathBuf,

    /// When the split run finished
    pub created_at: DateTime<Utc>,

    /// Segments in the order they were written
    pub segments: Vec<ManifestEntry>,
}

/// One segment entry; `file` is relative to the manifest's directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub file: String,
    pub start: f64,
    pub end: f64,
}

impl Manifest {
    pub fn new<P: Into<PathBuf>>(source: P) -> Self {
        Self {
            source: source.into(),
            created_at: Utc::now(),
            segments: Vec::new(),
        }
    }

    /// Record a written segment. Only the file name is kept; entries resolve
    /// against whatever directory the manifest ends up in.
    pub fn record(&mut self, segment: &Segment) {
        let file = segment
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        self.segments.push(ManifestEntry {
            file,
            start: segment.start,
            end: segment.end,
        });
    }

    /// Look up a segment's time range by file name.
    pub fn time_range(&self, file_name: &str) -> Option<(f64, f64)> {
        self.segments
            .iter()
            .find(|entry| entry.file == file_name)
            .map(|entry| (entry.start, entry.end))
    }

    /// Write the manifest into `dir` as [`MANIFEST_FILE`].
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            SegmentError::ManifestInvalid {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Load a manifest from an explicit file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&content).map_err(|e| {
            SegmentError::ManifestInvalid {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_manifest_round_trip() {
        let dir = tempdir().unwrap();

        let mut manifest = Manifest::new("/videos/holiday.mp4");
        manifest.record(&Segment::new("/out/split/segment_000_000.0-010.0.mp4", 0.0, 10.0));
        manifest.record(&Segment::new("/out/split/segment_001_008.0-018.0.mp4", 8.0, 18.0));

        let path = manifest.save(dir.path()).unwrap();
        assert_eq!(path, dir.path().join(MANIFEST_FILE));

        let loaded = Manifest::load(&path).unwrap();
        assert_eq!(loaded.source, PathBuf::from("/videos/holiday.mp4"));
        assert_eq!(loaded.segments, manifest.segments);

        // Time ranges survive bit-for-bit, unlike the one-decimal filenames.
        assert_eq!(
            loaded.time_range("segment_001_008.0-018.0.mp4"),
            Some((8.0, 18.0))
        );
    }

    #[test]
    fn test_unknown_file_has_no_range() {
        let manifest = Manifest::new("/videos/holiday.mp4");
        assert_eq!(manifest.time_range("segment_000_000.0-010.0.mp4"), None);
    }

    #[test]
    fn test_malformed_manifest_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        assert!(Manifest::load(&path).is_err());
    }
}
