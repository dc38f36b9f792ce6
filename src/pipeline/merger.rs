use std::path::PathBuf;

use tracing::{debug, info};

use crate::codec::{AudioCodec, EnvelopedClip, MediaCodec};
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::segment::naming::{merged_file_name, resolve_prefix};
use crate::segment::{Segment, SegmentDiscovery, SegmentSource};
use crate::timeline::{FadeEnvelope, FadePosition};

/// Merges segment files into one continuous video with crossfade joins.
///
/// Segments composite in ascending start order regardless of how they were
/// discovered. Adjacent segments overlap by exactly the configured crossfade
/// duration, so the output runs the sum of segment durations minus
/// `(N - 1) * fade`.
pub struct Merger {
    config: Config,
    codec: Box<dyn MediaCodec>,
}

impl Merger {
    pub fn new(config: Config, codec: Box<dyn MediaCodec>) -> Self {
        Self { config, codec }
    }

    /// Merge the segments in `source` into one file named under `prefix`.
    pub async fn merge(&self, source: &SegmentSource, prefix: &str) -> Result<PathBuf> {
        self.config.validate()?;

        let fade = self.config.merge.fade_duration;

        // Composited audio always passes through the crossfade graph, so it
        // cannot be stream-copied.
        if self.config.encoding.audio_codec == AudioCodec::Copy {
            return Err(ConfigError::InvalidValue {
                key: "encoding.audio_codec".to_string(),
                value: "copy (unsupported when merging)".to_string(),
            }
            .into());
        }

        info!("🎞️  Analyzing video segments...");
        let segments = SegmentDiscovery::new().discover(source)?;
        let total = segments.len();
        info!("   Found {} segments to merge", total);

        self.check_fade_window(&segments, fade)?;

        let clips: Vec<EnvelopedClip> = segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                let position = FadePosition::of(i, total);
                info!(
                    "   Preparing segment {}/{} ({:.1}%)",
                    i + 1,
                    total,
                    (i as f64 / total as f64) * 100.0
                );
                debug!(
                    "Segment {:?} [{:.1}s-{:.1}s] {:?}",
                    segment.path.file_name().unwrap_or_default(),
                    segment.start,
                    segment.end,
                    position
                );
                EnvelopedClip {
                    path: segment.path.clone(),
                    duration: segment.duration(),
                    envelope: FadeEnvelope::for_position(position, fade, segment.duration()),
                }
            })
            .collect();

        let (dir, name_prefix) = resolve_prefix(&self.config.output.root, prefix);
        std::fs::create_dir_all(&dir)?;

        let output = dir.join(merged_file_name(
            &name_prefix,
            segments[0].start,
            &self.config.output.extension,
        ));

        let expected: f64 = clips.iter().map(|c| c.duration).sum::<f64>()
            - (total.saturating_sub(1)) as f64 * fade;
        info!(
            "   Compositing {} segments (crossfade {:.1}s, expected output {:.1}s)...",
            total, fade, expected
        );

        self.codec
            .composite(&clips, fade, &self.config.encoding, &output)
            .await?;

        info!("✅ Merge complete: {:?}", output);
        Ok(output)
    }

    /// Overlapping fade ramps would double-apply, so the crossfade must fit
    /// twice into every segment.
    fn check_fade_window(&self, segments: &[Segment], fade: f64) -> Result<()> {
        if segments.len() < 2 {
            return Ok(());
        }

        let shortest = segments
            .iter()
            .map(Segment::duration)
            .fold(f64::INFINITY, f64::min);

        if 2.0 * fade > shortest {
            return Err(ConfigError::FadeTooLong { fade, shortest }.into());
        }

        Ok(())
    }
}
