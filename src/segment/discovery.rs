use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{InputError, Result, SegmentError};
use crate::segment::manifest::{Manifest, MANIFEST_FILE};
use crate::segment::naming::TimeRangeParser;
use crate::segment::Segment;

/// Where the merger's candidate segment files come from.
#[derive(Debug, Clone)]
pub enum SegmentSource {
    /// Comma-separated list of explicit file paths
    List(String),

    /// Directory scanned for files with the given extension
    Directory { path: PathBuf, extension: String },
}

/// Discovers segment files and recovers their time ranges.
///
/// Each candidate is resolved against its directory's sidecar manifest first,
/// then against the filename time-range suffix. Files with no recoverable
/// range are skipped with a warning; they never fail the batch. The result is
/// sorted by start time, ties broken by path so the ordering is deterministic
/// regardless of filesystem enumeration order.
pub struct SegmentDiscovery {
    parser: TimeRangeParser,
    manifests: HashMap<PathBuf, Option<Manifest>>,
}

impl SegmentDiscovery {
    pub fn new() -> Self {
        Self {
            parser: TimeRangeParser::new(),
            manifests: HashMap::new(),
        }
    }

    /// Resolve `source` into an ordered merge batch.
    ///
    /// Fails with `NoSegmentsSupplied` for an empty path list, and with
    /// `NoValidSegments` when filtering leaves nothing usable, the one hard
    /// failure that can occur mid-discovery.
    pub fn discover(&mut self, source: &SegmentSource) -> Result<Vec<Segment>> {
        let candidates = match source {
            SegmentSource::List(raw) => self.candidates_from_list(raw)?,
            SegmentSource::Directory { path, extension } => {
                self.candidates_from_directory(path, extension)?
            }
        };

        let mut segments = Vec::new();
        for path in candidates {
            match self.time_range_for(&path) {
                Some((start, end)) => segments.push(Segment::new(path, start, end)),
                None => warn!("Skipping segment with no recoverable time range: {:?}", path),
            }
        }

        if segments.is_empty() {
            return Err(SegmentError::NoValidSegments.into());
        }

        segments.sort_by(|a, b| {
            a.start
                .total_cmp(&b.start)
                .then_with(|| a.path.cmp(&b.path))
        });

        debug!("Discovered {} segments", segments.len());
        Ok(segments)
    }

    fn candidates_from_list(&self, raw: &str) -> Result<Vec<PathBuf>> {
        let paths: Vec<PathBuf> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();

        if paths.is_empty() {
            return Err(InputError::NoSegmentsSupplied.into());
        }

        Ok(paths
            .into_iter()
            .filter(|path| {
                let exists = path.is_file();
                if !exists {
                    warn!("Segment not found: {:?}", path);
                }
                exists
            })
            .collect())
    }

    fn candidates_from_directory(&self, dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(InputError::DirectoryNotFound {
                path: dir.display().to_string(),
            }
            .into());
        }

        let mut candidates = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();

            if path.is_file() && !is_hidden_file(&path) && has_extension(&path, extension) {
                candidates.push(path);
            }
        }

        Ok(candidates)
    }

    /// Manifest entry first, filename pattern as the compatibility fallback.
    fn time_range_for(&mut self, path: &Path) -> Option<(f64, f64)> {
        self.manifest_range(path)
            .or_else(|| self.parser.parse(path))
    }

    fn manifest_range(&mut self, path: &Path) -> Option<(f64, f64)> {
        let dir = path.parent()?.to_path_buf();

        let manifest = self.manifests.entry(dir.clone()).or_insert_with(|| {
            let manifest_path = dir.join(MANIFEST_FILE);
            if !manifest_path.is_file() {
                return None;
            }
            match Manifest::load(&manifest_path) {
                Ok(manifest) => {
                    debug!("Using manifest: {:?}", manifest_path);
                    Some(manifest)
                }
                Err(e) => {
                    warn!("Ignoring unreadable manifest {:?}: {}", manifest_path, e);
                    None
                }
            }
        });

        let name = path.file_name()?.to_str()?;
        manifest.as_ref()?.time_range(name)
    }
}

impl Default for SegmentDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

fn is_hidden_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
