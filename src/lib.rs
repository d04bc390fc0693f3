//! # Chopper - Beat Slicer
//!
//! Cuts a decoded audio loop into playable slices.
//!
//! ## Architecture
//!
//! Chopper is an umbrella crate over:
//! - **chopper-core** - Signal, slice and config types, errors, cancellation
//! - **chopper-analysis** - FFT framing, spectral flux, thresholds, peaks, zero-crossings
//! - **chopper-slicer** - Transient/grid/manual slicing, editing, tempo, extraction
//!
//! ## Quick Start
//!
//! ```
//! use chopper::prelude::*;
//!
//! let mut engine = SliceEngine::builder().build()?;
//! engine.set_signal(Signal::silence(44100, 2, 44100)?);
//!
//! let config = AnalysisConfig::default().with_sensitivity(0.7);
//! let slices = engine.analyze(&config, None);
//! assert_eq!(slices.len(), 1);
//!
//! let audio = engine.extract_slice(&slices[0], &ExtractOptions::default());
//! assert_eq!(audio.map(|a| a.frame_count()), Some(44100));
//! # Ok::<(), chopper::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default) - Spectral flux over rayon worker chunks
//! - `serialization` - serde support for configs, slices and analysis results

/// Re-export of chopper-core for direct access
pub use chopper_core as core;

/// Re-export of chopper-analysis for the individual analysis stages
pub use chopper_analysis as analysis;

/// Re-export of chopper-slicer for the free-function API
pub use chopper_slicer as slicer;

pub use chopper_core::{
    AnalysisConfig, CancelToken, Error, FrameParams, Result, Signal, SignalSource, Slice, SliceId,
    SliceList, SliceMode,
};

pub use chopper_analysis::{downmix, find_zero_crossing, Execution, Radix2Fft};

pub use chopper_slicer::{
    add_manual_slice, detect_transients, estimate_bpm, extract_slice_audio, generate_grid_slices,
    generate_slices, manual_slices, remove_slice, AnalysisResult, ExtractOptions,
    TransientDetector, DEFAULT_BPM,
};

mod builder;
mod engine;

pub use builder::SliceEngineBuilder;
pub use engine::SliceEngine;

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{SliceEngine, SliceEngineBuilder};

    pub use crate::core::{
        AnalysisConfig, CancelToken, FrameParams, Signal, SignalSource, Slice, SliceId, SliceList,
        SliceMode,
    };

    pub use crate::slicer::{AnalysisResult, ExtractOptions};
}
