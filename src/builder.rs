//! Builder for configuring and constructing a `SliceEngine`.

use crate::analysis::Execution;
use crate::core::{Error, FrameParams, DEFAULT_FRAME_SIZE, DEFAULT_HOP_SIZE, MAX_FRAME_SIZE};
use crate::{Result, SliceEngine};

/// Frame size is rounded up to the next power of two and may not exceed
/// [`MAX_FRAME_SIZE`]; the hop may not exceed the (rounded) frame size.
///
/// # Example
///
/// ```
/// use chopper::prelude::*;
///
/// let engine = SliceEngine::builder()
///     .frame_size(1024)
///     .hop_size(256)
///     .parallel(false)
///     .build()
///     .unwrap();
///
/// assert_eq!(engine.frame_params().frame_size(), 1024);
/// ```
pub struct SliceEngineBuilder {
    frame_size: usize,
    hop_size: usize,
    execution: Execution,
}

impl Default for SliceEngineBuilder {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            hop_size: DEFAULT_HOP_SIZE,
            execution: Execution::Parallel,
        }
    }
}

impl SliceEngineBuilder {
    /// Default: 2048
    pub fn frame_size(mut self, samples: usize) -> Self {
        self.frame_size = samples;
        self
    }

    /// Default: 512
    pub fn hop_size(mut self, samples: usize) -> Self {
        self.hop_size = samples;
        self
    }

    /// Compute frame spectra in parallel chunks. Default: true
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.execution = if enabled {
            Execution::Parallel
        } else {
            Execution::Sequential
        };
        self
    }

    pub fn build(self) -> Result<SliceEngine> {
        if self.frame_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "frame_size {} must be at least 2",
                self.frame_size
            )));
        }
        if self.frame_size > MAX_FRAME_SIZE {
            return Err(Error::InvalidConfig(format!(
                "frame_size {} exceeds the maximum of {MAX_FRAME_SIZE}",
                self.frame_size
            )));
        }
        if self.hop_size == 0 {
            return Err(Error::InvalidConfig("hop_size must be positive".into()));
        }

        let params = FrameParams::new(self.frame_size, self.hop_size);
        if params.frame_size() != self.frame_size {
            tracing::debug!(
                requested = self.frame_size,
                frame_size = params.frame_size(),
                "frame size rounded up to a power of two"
            );
        }
        if self.hop_size > params.frame_size() {
            return Err(Error::InvalidConfig(format!(
                "hop_size {} exceeds frame_size {}",
                self.hop_size,
                params.frame_size()
            )));
        }

        Ok(SliceEngine::from_parts(params, self.execution))
    }
}
