//! # vidsplice
//!
//! Split videos into fixed-length, overlapping segments and merge segment
//! sets back into one continuous video with crossfade transitions.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vidsplice::{
//!     codec::FfmpegCodec,
//!     config::Config,
//!     pipeline::{Merger, Splitter},
//!     segment::SegmentSource,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//!
//! let splitter = Splitter::new(config.clone(), Box::new(FfmpegCodec::new()?));
//! let outcome = splitter
//!     .split(std::path::Path::new("movie.mp4"), "split/segment_")
//!     .await?;
//! println!("wrote {} segments", outcome.segments.len());
//!
//! let merger = Merger::new(config, Box::new(FfmpegCodec::new()?));
//! let source = SegmentSource::Directory {
//!     path: "output/split".into(),
//!     extension: "mp4".into(),
//! };
//! let merged = merger.merge(&source, "merged/output_").await?;
//! println!("merged into {:?}", merged);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`timeline`] - Interval planning and fade envelope math
//! - [`segment`] - Segment metadata, naming convention, manifest, discovery
//! - [`codec`] - The media codec collaborator boundary (FFmpeg backend)
//! - [`pipeline`] - The splitter and merger pipelines
//! - [`node`] - Host-visible parameter descriptors for the two nodes
//! - [`config`] - Configuration management
//!
//! Both pipelines are stateless and sequential; the only shared convention
//! between them is the segment metadata (sidecar manifest, with the
//! `_<start>-<end>` filename suffix as a compatibility fallback).

pub mod codec;
pub mod config;
pub mod error;
pub mod node;
pub mod pipeline;
pub mod segment;
pub mod timeline;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{Result, SpliceError},
    pipeline::{Merger, SplitOutcome, Splitter},
    segment::{Segment, SegmentSource},
    timeline::{FadeEnvelope, Interval},
};
