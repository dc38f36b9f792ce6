use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Video codec for encoded output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoCodec {
    Libx264,
    Hevc,
}

impl VideoCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Libx264 => "libx264",
            Self::Hevc => "hevc",
        }
    }
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoCodec {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "libx264" => Ok(Self::Libx264),
            "hevc" => Ok(Self::Hevc),
            other => Err(ConfigError::InvalidValue {
                key: "video_codec".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Audio codec for encoded output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCodec {
    Aac,
    Libmp3lame,
    /// Stream-copy the source audio without re-encoding
    Copy,
}

impl AudioCodec {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aac => "aac",
            Self::Libmp3lame => "libmp3lame",
            Self::Copy => "copy",
        }
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioCodec {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "aac" => Ok(Self::Aac),
            "libmp3lame" => Ok(Self::Libmp3lame),
            "copy" => Ok(Self::Copy),
            other => Err(ConfigError::InvalidValue {
                key: "audio_codec".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Encoder speed/quality preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Ultrafast,
    Superfast,
    Veryfast,
    Faster,
    Fast,
    Medium,
    Slow,
    Slower,
    Veryslow,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ultrafast => "ultrafast",
            Self::Superfast => "superfast",
            Self::Veryfast => "veryfast",
            Self::Faster => "faster",
            Self::Fast => "fast",
            Self::Medium => "medium",
            Self::Slow => "slow",
            Self::Slower => "slower",
            Self::Veryslow => "veryslow",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ultrafast" => Ok(Self::Ultrafast),
            "superfast" => Ok(Self::Superfast),
            "veryfast" => Ok(Self::Veryfast),
            "faster" => Ok(Self::Faster),
            "fast" => Ok(Self::Fast),
            "medium" => Ok(Self::Medium),
            "slow" => Ok(Self::Slow),
            "slower" => Ok(Self::Slower),
            "veryslow" => Ok(Self::Veryslow),
            other => Err(ConfigError::InvalidValue {
                key: "preset".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Full set of encoding options handed to the codec collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingParams {
    /// Video codec for output segments
    pub video_codec: VideoCodec,

    /// Video bitrate, e.g. "8000k"
    pub video_bitrate: String,

    /// Audio codec for output segments
    pub audio_codec: AudioCodec,

    /// Audio bitrate, e.g. "192k"
    pub audio_bitrate: String,

    /// Encoder preset name
    pub preset: Preset,

    /// Encoder worker threads
    pub threads: usize,
}

impl Default for EncodingParams {
    fn default() -> Self {
        Self {
            video_codec: VideoCodec::Libx264,
            video_bitrate: "8000k".to_string(),
            audio_codec: AudioCodec::Aac,
            audio_bitrate: "192k".to_string(),
            preset: Preset::Medium,
            threads: num_cpus::get(),
        }
    }
}

impl EncodingParams {
    pub fn validate(&self) -> Result<()> {
        if !is_valid_bitrate(&self.video_bitrate) {
            return Err(ConfigError::InvalidValue {
                key: "encoding.video_bitrate".to_string(),
                value: self.video_bitrate.clone(),
            }
            .into());
        }

        if !is_valid_bitrate(&self.audio_bitrate) {
            return Err(ConfigError::InvalidValue {
                key: "encoding.audio_bitrate".to_string(),
                value: self.audio_bitrate.clone(),
            }
            .into());
        }

        if self.threads == 0 {
            return Err(ConfigError::InvalidValue {
                key: "encoding.threads".to_string(),
                value: self.threads.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Bitrates follow FFmpeg's shorthand: digits plus an optional k/M suffix.
fn is_valid_bitrate(value: &str) -> bool {
    let digits = value
        .strip_suffix('k')
        .or_else(|| value.strip_suffix('M'))
        .unwrap_or(value);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
