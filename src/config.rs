use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codec::EncodingParams;
use crate::error::{ConfigError, Result};

/// Main configuration for vidsplice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Output placement settings
    pub output: OutputConfig,

    /// Splitter settings
    pub split: SplitConfig,

    /// Merger settings
    pub merge: MergeConfig,

    /// Encoding options passed to the codec collaborator
    pub encoding: EncodingParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            split: SplitConfig::default(),
            merge: MergeConfig::default(),
            encoding: EncodingParams::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.output.validate()?;
        self.split.validate()?;
        self.merge.validate()?;
        self.encoding.validate()?;
        Ok(())
    }
}

/// Output placement configuration
///
/// All output paths resolve below `root`; prefixes passed to the pipelines
/// may add subdirectories underneath it. The root is always an explicit
/// value; nothing is probed from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Base directory for all written files
    pub root: PathBuf,

    /// Container extension for written files (no leading dot)
    pub extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("output"),
            extension: "mp4".to_string(),
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output.root".to_string(),
                value: String::new(),
            }
            .into());
        }

        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(ConfigError::InvalidValue {
                key: "output.extension".to_string(),
                value: self.extension.clone(),
            }
            .into());
        }

        Ok(())
    }
}

/// Splitter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Length of each segment in seconds
    pub segment_length: f64,

    /// Overlap between consecutive segments in seconds
    pub overlap: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            segment_length: 10.0,
            overlap: 2.0,
        }
    }
}

impl SplitConfig {
    fn validate(&self) -> Result<()> {
        if self.segment_length <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "split.segment_length".to_string(),
                value: self.segment_length.to_string(),
            }
            .into());
        }

        if self.overlap < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "split.overlap".to_string(),
                value: self.overlap.to_string(),
            }
            .into());
        }

        // The start grid advances in whole seconds, so anything below one
        // second of step stalls.
        if self.segment_length - self.overlap < 1.0 {
            return Err(ConfigError::NoForwardProgress {
                segment_length: self.segment_length,
                overlap: self.overlap,
            }
            .into());
        }

        Ok(())
    }
}

/// Merger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Crossfade duration at each join, in seconds
    pub fade_duration: f64,

    /// Extension filter when discovering segments from a directory
    pub extension: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            fade_duration: 2.0,
            extension: "mp4".to_string(),
        }
    }
}

impl MergeConfig {
    fn validate(&self) -> Result<()> {
        if self.fade_duration <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "merge.fade_duration".to_string(),
                value: self.fade_duration.to_string(),
            }
            .into());
        }

        if self.extension.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "merge.extension".to_string(),
                value: self.extension.clone(),
            }
            .into());
        }

        Ok(())
    }
}
