use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};

use vidsplice::{
    codec::{AudioCodec, FfmpegCodec, Preset, VideoCodec},
    config::Config,
    node::{self, NodeDescriptor},
    pipeline::{Merger, Splitter},
    segment::SegmentSource,
};

#[derive(Parser)]
#[command(
    name = "vidsplice",
    version,
    about = "Split videos into overlapping segments and merge them back with crossfades",
    long_about = "vidsplice cuts a video into fixed-length, overlapping segments that can be \
processed independently and later reassembled into one continuous video with crossfade \
transitions at the joins."
)]
struct Cli {
    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base directory for written output
    #[arg(short, long)]
    output_root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a video into fixed-length overlapping segments
    Split {
        /// Source video path
        #[arg(short, long)]
        input: PathBuf,

        /// Output filename prefix (may include subdirectories)
        #[arg(short, long, default_value = "split/segment_")]
        prefix: String,

        /// Segment length in seconds
        #[arg(long)]
        segment_length: Option<f64>,

        /// Overlap between consecutive segments in seconds
        #[arg(long)]
        overlap: Option<f64>,

        #[command(flatten)]
        encoding: EncodingArgs,
    },

    /// Merge segments into one video with crossfade transitions
    Merge {
        /// Comma-separated segment file paths
        #[arg(short, long)]
        segments: Option<String>,

        /// Directory to scan for segment files
        #[arg(short = 'd', long, conflicts_with = "segments")]
        segments_dir: Option<PathBuf>,

        /// Output filename prefix (may include subdirectories)
        #[arg(short, long, default_value = "merged/output_")]
        prefix: String,

        /// Crossfade duration in seconds
        #[arg(long)]
        fade_duration: Option<f64>,

        #[command(flatten)]
        encoding: EncodingArgs,
    },
}

#[derive(Args)]
struct EncodingArgs {
    /// Video codec (libx264, hevc)
    #[arg(long)]
    video_codec: Option<String>,

    /// Video bitrate, e.g. 8000k
    #[arg(long)]
    video_bitrate: Option<String>,

    /// Audio codec (aac, libmp3lame, copy)
    #[arg(long)]
    audio_codec: Option<String>,

    /// Audio bitrate, e.g. 192k
    #[arg(long)]
    audio_bitrate: Option<String>,

    /// Encoder preset (ultrafast .. veryslow)
    #[arg(long)]
    preset: Option<String>,
}

impl EncodingArgs {
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(value) = &self.video_codec {
            config.encoding.video_codec = VideoCodec::from_str(value)?;
        }
        if let Some(value) = &self.video_bitrate {
            config.encoding.video_bitrate = value.clone();
        }
        if let Some(value) = &self.audio_codec {
            config.encoding.audio_codec = AudioCodec::from_str(value)?;
        }
        if let Some(value) = &self.audio_bitrate {
            config.encoding.audio_bitrate = value.clone();
        }
        if let Some(value) = &self.preset {
            config.encoding.preset = Preset::from_str(value)?;
        }
        Ok(())
    }
}

/// Range-check a float against the node's parameter metadata.
fn check_param(node: &NodeDescriptor, name: &str, value: f64) -> Result<()> {
    let param = node
        .param(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", name))?;
    param.check_float(value)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting vidsplice v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };

    if let Some(root) = cli.output_root {
        config.output.root = root;
    }

    match cli.command {
        Command::Split {
            input,
            prefix,
            segment_length,
            overlap,
            encoding,
        } => {
            let node = node::split_node();
            if let Some(value) = segment_length {
                check_param(&node, "segment_length", value)?;
                config.split.segment_length = value;
            }
            if let Some(value) = overlap {
                check_param(&node, "overlap", value)?;
                config.split.overlap = value;
            }
            encoding.apply(&mut config)?;

            let splitter = Splitter::new(config, Box::new(FfmpegCodec::new()?));
            let outcome = splitter.split(&input, &prefix).await?;

            // Hosts consume the written paths as one comma-separated line.
            let paths: Vec<String> = outcome
                .segments
                .iter()
                .map(|s| s.path.display().to_string())
                .collect();
            println!("{}", paths.join(","));
        }

        Command::Merge {
            segments,
            segments_dir,
            prefix,
            fade_duration,
            encoding,
        } => {
            let node = node::merge_node();
            if let Some(value) = fade_duration {
                check_param(&node, "fade_duration", value)?;
                config.merge.fade_duration = value;
            }
            encoding.apply(&mut config)?;

            let source = match (segments, segments_dir) {
                (Some(list), _) => SegmentSource::List(list),
                (None, Some(dir)) => SegmentSource::Directory {
                    path: dir,
                    extension: config.merge.extension.clone(),
                },
                (None, None) => {
                    anyhow::bail!("either --segments or --segments-dir is required")
                }
            };

            let merger = Merger::new(config, Box::new(FfmpegCodec::new()?));
            let output = merger.merge(&source, &prefix).await?;

            println!("{}", output.display());
        }
    }

    Ok(())
}
