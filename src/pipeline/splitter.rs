use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::MediaCodec;
use crate::config::Config;
use crate::error::{InputError, Result};
use crate::segment::manifest::Manifest;
use crate::segment::naming::{resolve_prefix, segment_file_name};
use crate::segment::Segment;
use crate::timeline::plan;

/// Result of one split run
#[derive(Debug)]
pub struct SplitOutcome {
    /// Segments in the order they were written
    pub segments: Vec<Segment>,

    /// Path of the sidecar manifest, when any segment was written
    pub manifest: Option<PathBuf>,
}

/// Splits a source video into fixed-length, overlapping segments.
///
/// The pipeline is strictly sequential: probe the source, plan the
/// intervals, then extract them one at a time. A failure part-way leaves the
/// already-written segments on disk; nothing is rolled back.
pub struct Splitter {
    config: Config,
    codec: Box<dyn MediaCodec>,
}

impl Splitter {
    pub fn new(config: Config, codec: Box<dyn MediaCodec>) -> Self {
        Self { config, codec }
    }

    /// Split `source` into segments named under `prefix`.
    ///
    /// `prefix` may encode subdirectories below the configured output root;
    /// they are created as needed. An empty plan (source shorter than the
    /// minimum viable segment) returns an empty outcome, not an error.
    pub async fn split(&self, source: &Path, prefix: &str) -> Result<SplitOutcome> {
        self.config.validate()?;

        if !source.is_file() {
            return Err(InputError::SourceNotFound {
                path: source.display().to_string(),
            }
            .into());
        }

        info!("🎬 Splitting video: {:?}", source);

        let duration = self.codec.probe_duration(source).await?;
        debug!("Source duration: {:.3}s", duration);

        let intervals = plan(
            duration,
            self.config.split.segment_length,
            self.config.split.overlap,
        )?;

        if intervals.is_empty() {
            info!("   Nothing to do: no viable segments in {:.1}s of video", duration);
            return Ok(SplitOutcome {
                segments: Vec::new(),
                manifest: None,
            });
        }

        let (dir, name_prefix) = resolve_prefix(&self.config.output.root, prefix);
        std::fs::create_dir_all(&dir)?;

        let total = intervals.len();
        info!("   Splitting into {} segments...", total);

        let mut segments = Vec::with_capacity(total);
        for (i, interval) in intervals.iter().enumerate() {
            let progress = (i as f64 / total as f64) * 100.0;
            info!("   Processing segment {}/{} ({:.1}%)", i + 1, total, progress);

            let file_name = segment_file_name(
                &name_prefix,
                i,
                interval,
                &self.config.output.extension,
            );
            let output = dir.join(file_name);

            self.codec
                .extract_interval(source, *interval, &self.config.encoding, &output)
                .await?;

            debug!(
                "Wrote segment {:.1}s-{:.1}s to {:?}",
                interval.start, interval.end, output
            );
            segments.push(Segment::new(output, interval.start, interval.end));
        }

        let mut manifest = Manifest::new(source);
        for segment in &segments {
            manifest.record(segment);
        }
        let manifest_path = manifest.save(&dir)?;

        info!("✅ Split complete: {} segments under {:?}", segments.len(), dir);

        Ok(SplitOutcome {
            segments,
            manifest: Some(manifest_path),
        })
    }
}
