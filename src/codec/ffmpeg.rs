use std::path::Path;
use std::process::{Command, Stdio};

use async_trait::async_trait;
use tokio::task;
use tracing::debug;

use crate::codec::types::{AudioCodec, EncodingParams};
use crate::codec::{EnvelopedClip, MediaCodec};
use crate::error::{CodecError, Result};
use crate::timeline::Interval;

/// Media codec collaborator backed by the FFmpeg command line tools.
///
/// Each operation is a single `ffmpeg`/`ffprobe` subprocess, run to
/// completion on the blocking pool. The child process is the only native
/// resource and is always reaped by `output()`, error paths included.
pub struct FfmpegCodec;

impl FfmpegCodec {
    /// Create the codec, verifying both tools are reachable on PATH.
    pub fn new() -> Result<Self> {
        Self::check_tool("ffmpeg")?;
        Self::check_tool("ffprobe")?;
        Ok(Self)
    }

    fn check_tool(tool: &str) -> Result<()> {
        let available = Command::new(tool)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false);

        if available {
            Ok(())
        } else {
            Err(CodecError::Unavailable {
                tool: tool.to_string(),
            }
            .into())
        }
    }

    /// Run a prepared command to completion, returning stdout or the
    /// captured stderr as the error message.
    async fn run(mut cmd: Command) -> std::result::Result<Vec<u8>, String> {
        debug!("Running: {:?}", cmd);

        let output = task::spawn_blocking(move || cmd.output())
            .await
            .map_err(|e| format!("Failed to spawn process: {}", e))?
            .map_err(|e| format!("Process execution failed: {}", e))?;

        if !output.status.success() {
            return Err(String::from_utf8_lossy(&output.stderr).into_owned());
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl MediaCodec for FfmpegCodec {
    async fn probe_duration(&self, path: &Path) -> Result<f64> {
        let mut cmd = Command::new("ffprobe");
        cmd.args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(path);

        let stdout = Self::run(cmd).await.map_err(|reason| CodecError::ProbeFailed {
            path: path.display().to_string(),
            reason,
        })?;

        String::from_utf8_lossy(&stdout)
            .trim()
            .parse::<f64>()
            .map_err(|e| {
                CodecError::ProbeFailed {
                    path: path.display().to_string(),
                    reason: format!("unparseable duration: {}", e),
                }
                .into()
            })
    }

    async fn extract_interval(
        &self,
        source: &Path,
        interval: Interval,
        params: &EncodingParams,
        output: &Path,
    ) -> Result<()> {
        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-y")
            .args(["-ss", &format!("{:.3}", interval.start)])
            .arg("-i")
            .arg(source)
            .args(["-t", &format!("{:.3}", interval.duration())])
            .args(encoding_args(params))
            .arg(output);

        Self::run(cmd)
            .await
            .map_err(|reason| CodecError::ExtractFailed {
                start: interval.start,
                end: interval.end,
                reason,
            })?;

        Ok(())
    }

    async fn composite(
        &self,
        clips: &[EnvelopedClip],
        overlap: f64,
        params: &EncodingParams,
        output: &Path,
    ) -> Result<()> {
        if clips.is_empty() {
            return Err(CodecError::CompositeFailed {
                reason: "no clips to composite".to_string(),
            }
            .into());
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.arg("-y");
        for clip in clips {
            cmd.arg("-i").arg(&clip.path);
        }

        // A single clip needs no crossfade graph, only the re-encode.
        if clips.len() > 1 {
            let (graph, video_out, audio_out) = build_filter_graph(clips, overlap);
            cmd.args(["-filter_complex", &graph]);
            cmd.args(["-map", &format!("[{}]", video_out)]);
            cmd.args(["-map", &format!("[{}]", audio_out)]);
        }

        cmd.args(encoding_args(params)).arg(output);

        Self::run(cmd)
            .await
            .map_err(|reason| CodecError::CompositeFailed { reason })?;

        Ok(())
    }
}

/// Shared output-encoding arguments.
fn encoding_args(params: &EncodingParams) -> Vec<String> {
    let mut args = vec![
        "-c:v".to_string(),
        params.video_codec.as_str().to_string(),
        "-b:v".to_string(),
        params.video_bitrate.clone(),
        "-preset".to_string(),
        params.preset.as_str().to_string(),
        "-threads".to_string(),
        params.threads.to_string(),
        "-c:a".to_string(),
        params.audio_codec.as_str().to_string(),
    ];

    if params.audio_codec != AudioCodec::Copy {
        args.push("-b:a".to_string());
        args.push(params.audio_bitrate.clone());
    }

    args
}

/// Translate the enveloped clip sequence into an FFmpeg crossfade graph.
///
/// Clips chain through `xfade`/`acrossfade` pairs. The fade length at each
/// join comes from the incoming clip's fade-in ramp, and the offset is the
/// running timeline length minus that fade, so adjacent clips overlap by
/// exactly the crossfade duration.
///
/// Returns the graph plus the final video and audio labels to map.
fn build_filter_graph(clips: &[EnvelopedClip], overlap: f64) -> (String, String, String) {
    let mut filters = Vec::new();
    let mut video_in = "0:v".to_string();
    let mut audio_in = "0:a".to_string();
    let mut elapsed = clips[0].duration;

    for (i, clip) in clips.iter().enumerate().skip(1) {
        let fade = clip.envelope.fade_in().unwrap_or(overlap);
        let offset = elapsed - fade;
        let video_out = format!("vx{}", i);
        let audio_out = format!("ax{}", i);

        filters.push(format!(
            "[{}][{}:v]xfade=transition=fade:duration={:.3}:offset={:.3}[{}]",
            video_in, i, fade, offset, video_out
        ));
        filters.push(format!(
            "[{}][{}:a]acrossfade=d={:.3}[{}]",
            audio_in, i, fade, audio_out
        ));

        video_in = video_out;
        audio_in = audio_out;
        elapsed += clip.duration - fade;
    }

    (filters.join(";"), video_in, audio_in)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::{FadeEnvelope, FadePosition};
    use std::path::PathBuf;

    fn clip(name: &str, duration: f64, position: FadePosition, fade: f64) -> EnvelopedClip {
        EnvelopedClip {
            path: PathBuf::from(name),
            duration,
            envelope: FadeEnvelope::for_position(position, fade, duration),
        }
    }

    #[test]
    fn test_filter_graph_for_three_clips() {
        let clips = vec![
            clip("a.mp4", 10.0, FadePosition::First, 2.0),
            clip("b.mp4", 10.0, FadePosition::Interior, 2.0),
            clip("c.mp4", 9.0, FadePosition::Last, 2.0),
        ];

        let (graph, video_out, audio_out) = build_filter_graph(&clips, 2.0);

        assert_eq!(
            graph,
            "[0:v][1:v]xfade=transition=fade:duration=2.000:offset=8.000[vx1];\
             [0:a][1:a]acrossfade=d=2.000[ax1];\
             [vx1][2:v]xfade=transition=fade:duration=2.000:offset=16.000[vx2];\
             [ax1][2:a]acrossfade=d=2.000[ax2]"
        );
        assert_eq!(video_out, "vx2");
        assert_eq!(audio_out, "ax2");
    }

    #[test]
    fn test_join_offsets_shrink_total_by_fade() {
        // Durations 10 + 10 + 9 at fade 2 -> final join lands at 16s and the
        // composited timeline runs 25s.
        let clips = vec![
            clip("a.mp4", 10.0, FadePosition::First, 2.0),
            clip("b.mp4", 10.0, FadePosition::Interior, 2.0),
            clip("c.mp4", 9.0, FadePosition::Last, 2.0),
        ];

        let (graph, _, _) = build_filter_graph(&clips, 2.0);
        assert!(graph.contains("offset=16.000"));

        let total: f64 = clips.iter().map(|c| c.duration).sum();
        let expected = total - (clips.len() - 1) as f64 * 2.0;
        assert_eq!(expected, 25.0);
    }

    #[test]
    fn test_two_clip_graph_has_single_join() {
        let clips = vec![
            clip("a.mp4", 10.0, FadePosition::First, 1.5),
            clip("b.mp4", 10.0, FadePosition::Last, 1.5),
        ];

        let (graph, video_out, _) = build_filter_graph(&clips, 1.5);

        assert_eq!(graph.matches("xfade").count(), 1);
        assert_eq!(graph.matches("acrossfade").count(), 1);
        assert!(graph.contains("offset=8.500"));
        assert_eq!(video_out, "vx1");
    }

    #[test]
    fn test_encoding_args_spell_out_codecs() {
        let params = EncodingParams::default();
        let args = encoding_args(&params);

        let joined = args.join(" ");
        assert!(joined.contains("-c:v libx264"));
        assert!(joined.contains("-b:v 8000k"));
        assert!(joined.contains("-preset medium"));
        assert!(joined.contains("-c:a aac"));
        assert!(joined.contains("-b:a 192k"));
    }

    #[test]
    fn test_audio_copy_omits_audio_bitrate() {
        let params = EncodingParams {
            audio_codec: AudioCodec::Copy,
            ..Default::default()
        };
        let args = encoding_args(&params);

        let joined = args.join(" ");
        assert!(joined.contains("-c:a copy"));
        assert!(!joined.contains("-b:a"));
    }
}
