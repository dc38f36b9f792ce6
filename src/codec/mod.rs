//! # Codec Module
//!
//! The media codec collaborator boundary. Everything that touches decoding,
//! encoding, or container handling lives behind [`MediaCodec`]; the pipelines
//! only ever describe *what* to cut and composite, never how.

pub mod ffmpeg;
pub mod types;

pub use ffmpeg::FfmpegCodec;
pub use types::{AudioCodec, EncodingParams, Preset, VideoCodec};

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::timeline::{FadeEnvelope, Interval};

/// A segment scheduled for compositing, carrying its opacity envelope.
#[derive(Debug, Clone)]
pub struct EnvelopedClip {
    pub path: PathBuf,
    pub duration: f64,
    pub envelope: FadeEnvelope,
}

/// Narrow contract to the external media codec library.
///
/// Implementations hold native resources per open handle; every method must
/// release them on all exit paths, including errors.
#[async_trait]
pub trait MediaCodec: Send + Sync {
    /// Total duration of the media file, in seconds.
    async fn probe_duration(&self, path: &Path) -> Result<f64>;

    /// Extract `interval` from `source` as an independently playable,
    /// encoded file at `output`.
    async fn extract_interval(
        &self,
        source: &Path,
        interval: Interval,
        params: &EncodingParams,
        output: &Path,
    ) -> Result<()>;

    /// Concatenate `clips` in order into one encoded file at `output`,
    /// overlapping adjacent clips by `overlap` seconds and compositing
    /// (not hard-cutting) in the overlap region according to each clip's
    /// envelope. Total output duration is the sum of clip durations minus
    /// `(N - 1) * overlap`.
    async fn composite(
        &self,
        clips: &[EnvelopedClip],
        overlap: f64,
        params: &EncodingParams,
        output: &Path,
    ) -> Result<()>;
}
