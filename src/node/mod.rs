//! # Node Module
//!
//! Host-visible parameter surfaces for the two pipeline nodes. Each
//! descriptor lists a node's named parameters with type, default, and range
//! metadata; the CLI validates user input against these before anything runs.
//! Pure configuration; the pipelines never look at this module.

use crate::codec::{AudioCodec, Preset, VideoCodec};
use crate::error::{ConfigError, Result};

/// Parameter type plus its default and constraints
#[derive(Debug, Clone)]
pub enum ParamKind {
    Float {
        default: f64,
        min: f64,
        max: f64,
        step: f64,
    },
    Text {
        default: &'static str,
    },
    Choice {
        options: &'static [&'static str],
        default: &'static str,
    },
}

/// One named parameter of a node
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
}

impl ParamSpec {
    /// Range-check a float value against this parameter's metadata.
    pub fn check_float(&self, value: f64) -> Result<()> {
        if let ParamKind::Float { min, max, .. } = self.kind {
            if !(min..=max).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    name: self.name.to_string(),
                    value,
                    min,
                    max,
                }
                .into());
            }
        }
        Ok(())
    }
}

/// A node's full parameter surface
#[derive(Debug, Clone)]
pub struct NodeDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub params: Vec<ParamSpec>,
}

impl NodeDescriptor {
    /// Look up a parameter by name
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

const VIDEO_CODECS: &[&str] = &["libx264", "hevc"];
const AUDIO_CODECS: &[&str] = &["aac", "libmp3lame", "copy"];
const PRESETS: &[&str] = &[
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
];

fn encoding_params() -> Vec<ParamSpec> {
    vec![
        ParamSpec {
            name: "video_codec",
            kind: ParamKind::Choice {
                options: VIDEO_CODECS,
                default: VideoCodec::Libx264.as_str(),
            },
            required: false,
        },
        ParamSpec {
            name: "video_bitrate",
            kind: ParamKind::Text { default: "8000k" },
            required: false,
        },
        ParamSpec {
            name: "audio_codec",
            kind: ParamKind::Choice {
                options: AUDIO_CODECS,
                default: AudioCodec::Aac.as_str(),
            },
            required: false,
        },
        ParamSpec {
            name: "audio_bitrate",
            kind: ParamKind::Text { default: "192k" },
            required: false,
        },
        ParamSpec {
            name: "preset",
            kind: ParamKind::Choice {
                options: PRESETS,
                default: Preset::Medium.as_str(),
            },
            required: false,
        },
    ]
}

/// Descriptor for the video splitter node
pub fn split_node() -> NodeDescriptor {
    let mut params = vec![
        ParamSpec {
            name: "video_path",
            kind: ParamKind::Text { default: "" },
            required: true,
        },
        ParamSpec {
            name: "prefix",
            kind: ParamKind::Text {
                default: "split/segment_",
            },
            required: true,
        },
        ParamSpec {
            name: "segment_length",
            kind: ParamKind::Float {
                default: 10.0,
                min: 3.0,
                max: 60.0,
                step: 1.0,
            },
            required: true,
        },
        ParamSpec {
            name: "overlap",
            kind: ParamKind::Float {
                default: 2.0,
                min: 0.0,
                max: 10.0,
                step: 0.5,
            },
            required: true,
        },
    ];
    params.extend(encoding_params());

    NodeDescriptor {
        name: "video_splitter",
        display_name: "Split Video into Segments",
        category: "video",
        params,
    }
}

/// Descriptor for the video merger node
pub fn merge_node() -> NodeDescriptor {
    let mut params = vec![
        ParamSpec {
            name: "segments",
            kind: ParamKind::Text { default: "" },
            required: true,
        },
        ParamSpec {
            name: "prefix",
            kind: ParamKind::Text {
                default: "merged/output_",
            },
            required: true,
        },
        ParamSpec {
            name: "fade_duration",
            kind: ParamKind::Float {
                default: 2.0,
                min: 0.5,
                max: 5.0,
                step: 0.5,
            },
            required: true,
        },
    ];
    params.extend(encoding_params());

    NodeDescriptor {
        name: "video_merger",
        display_name: "Merge Video Segments",
        category: "video",
        params,
    }
}
