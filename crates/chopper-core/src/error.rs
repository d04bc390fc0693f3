//! Error types for chopper-core.

use thiserror::Error;

/// Error type for slicing operations.
///
/// Only structurally invalid input and cancellation are errors. Edits that
/// would break slice invariants are no-ops, not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid sample rate: {0}. Must be greater than zero")]
    InvalidSampleRate(u32),

    #[error("Channel {channel} has {actual} frames, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid slice range: start={start}, end={end}")]
    InvalidSlice { start: usize, end: usize },

    #[error("Slice ends at frame {end} but the signal has {frame_count} frames")]
    SliceOutOfBounds { end: usize, frame_count: usize },

    #[error("Analysis cancelled")]
    Cancelled,
}

/// Result type for chopper operations.
pub type Result<T> = std::result::Result<T, Error>;
