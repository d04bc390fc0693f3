//! Data model shared by the chopper crates.
//!
//! - [`Signal`] / [`SignalSource`]: decoded multi-channel audio
//! - [`Slice`] / [`SliceList`]: ordered, contiguous slice records
//! - [`AnalysisConfig`] / [`FrameParams`]: slicing and STFT parameters
//! - [`CancelToken`]: cooperative cancellation for long analyses

pub mod cancel;
pub mod config;
pub mod error;
pub mod signal;
pub mod slice;

pub use cancel::CancelToken;
pub use config::{
    AnalysisConfig, FrameParams, SliceMode, DEFAULT_FRAME_SIZE, DEFAULT_HOP_SIZE,
    DEFAULT_SNAP_RADIUS, MAX_FRAME_SIZE, MAX_GRID_DIVISION,
};
pub use error::{Error, Result};
pub use signal::{Signal, SignalSource};
pub use slice::{Slice, SliceId, SliceList};
