use thiserror::Error;

/// Main error type for the vidsplice library
#[derive(Error, Debug)]
pub enum SpliceError {
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Segment error: {0}")]
    Segment(#[from] SegmentError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input validation errors, raised before any work begins
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Source video not found: {path}")]
    SourceNotFound { path: String },

    #[error("Segments directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No segment paths supplied")]
    NoSegmentsSupplied,
}

/// Segment discovery and metadata errors
#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("No valid video segments found")]
    NoValidSegments,

    #[error("Manifest unreadable: {path} - {reason}")]
    ManifestInvalid { path: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Parameter out of range: {name} = {value} (allowed {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("No forward progress: overlap {overlap}s >= segment length {segment_length}s")]
    NoForwardProgress { segment_length: f64, overlap: f64 },

    #[error("Fade duration {fade}s too long for shortest segment ({shortest}s)")]
    FadeTooLong { fade: f64, shortest: f64 },
}

/// Errors surfaced by the media codec collaborator
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Codec tool not available: {tool}")]
    Unavailable { tool: String },

    #[error("Failed to probe media file: {path} - {reason}")]
    ProbeFailed { path: String, reason: String },

    #[error("Segment extraction failed at {start:.1}s-{end:.1}s: {reason}")]
    ExtractFailed {
        start: f64,
        end: f64,
        reason: String,
    },

    #[error("Compositing failed: {reason}")]
    CompositeFailed { reason: String },
}

/// Convenience type alias for Results using SpliceError
pub type Result<T> = std::result::Result<T, SpliceError>;

impl SpliceError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(InputError::SourceNotFound { path }) => {
                format!(
                    "Could not find the source video '{}'. Please check the path exists.",
                    path
                )
            }
            Self::Segment(SegmentError::NoValidSegments) => {
                "No usable segments were found. Segment files must carry a \
                 '_<start>-<end>' time range suffix or appear in a segments.json manifest."
                    .to_string()
            }
            Self::Config(ConfigError::NoForwardProgress {
                segment_length,
                overlap,
            }) => {
                format!(
                    "Overlap ({}s) must be smaller than the segment length ({}s).",
                    overlap, segment_length
                )
            }
            Self::Codec(CodecError::Unavailable { tool }) => {
                format!("'{}' was not found on PATH. Please install FFmpeg.", tool)
            }
            _ => self.to_string(),
        }
    }
}
