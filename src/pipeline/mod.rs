//! # Pipeline Module
//!
//! The two stateless pipelines: [`Splitter`] cuts a source video into
//! overlapping segments, [`Merger`] composites segments back into one video
//! with crossfade joins. Each runs to completion or raises a terminal error;
//! nothing is shared between invocations. Output paths are deterministic
//! from the inputs, so concurrent invocations must use disjoint output
//! roots to avoid colliding.

pub mod merger;
pub mod splitter;

pub use merger::Merger;
pub use splitter::{SplitOutcome, Splitter};

#[cfg(test)]
pub(crate) mod testing {
    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::codec::{EncodingParams, EnvelopedClip, MediaCodec};
    use crate::error::Result;
    use crate::timeline::{FadeEnvelope, Interval};

    /// One recorded collaborator call
    #[derive(Debug, Clone)]
    pub enum CodecCall {
        Probe {
            path: PathBuf,
        },
        Extract {
            source: PathBuf,
            interval: Interval,
            output: PathBuf,
        },
        Composite {
            clips: Vec<(PathBuf, f64, FadeEnvelope)>,
            overlap: f64,
            output: PathBuf,
        },
    }

    /// Codec stand-in that records calls and writes empty output files.
    #[derive(Clone)]
    pub struct MockCodec {
        inner: Arc<Inner>,
    }

    struct Inner {
        duration: f64,
        calls: Mutex<Vec<CodecCall>>,
    }

    impl MockCodec {
        pub fn new(duration: f64) -> Self {
            Self {
                inner: Arc::new(Inner {
                    duration,
                    calls: Mutex::new(Vec::new()),
                }),
            }
        }

        pub fn calls(&self) -> Vec<CodecCall> {
            self.inner.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MediaCodec for MockCodec {
        async fn probe_duration(&self, path: &Path) -> Result<f64> {
            self.inner.calls.lock().unwrap().push(CodecCall::Probe {
                path: path.to_path_buf(),
            });
            Ok(self.inner.duration)
        }

        async fn extract_interval(
            &self,
            source: &Path,
            interval: Interval,
            _params: &EncodingParams,
            output: &Path,
        ) -> Result<()> {
            std::fs::write(output, b"")?;
            self.inner.calls.lock().unwrap().push(CodecCall::Extract {
                source: source.to_path_buf(),
                interval,
                output: output.to_path_buf(),
            });
            Ok(())
        }

        async fn composite(
            &self,
            clips: &[EnvelopedClip],
            overlap: f64,
            _params: &EncodingParams,
            output: &Path,
        ) -> Result<()> {
            std::fs::write(output, b"")?;
            self.inner.calls.lock().unwrap().push(CodecCall::Composite {
                clips: clips
                    .iter()
                    .map(|c| (c.path.clone(), c.duration, c.envelope))
                    .collect(),
                overlap,
                output: output.to_path_buf(),
            });
            Ok(())
        }
    }
}
