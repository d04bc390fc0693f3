//! # Chopper Analysis
//!
//! Onset analysis building blocks for beat slicing:
//! - **Mono downmix**: channel averaging for analysis
//! - **Radix-2 FFT**: in-place Cooley-Tukey transform, power-of-two sizes only
//! - **Frame analysis**: Hann-windowed magnitude spectra over hop-spaced frames
//! - **Spectral flux**: half-wave rectified frame-to-frame energy increase,
//!   sequential or in parallel chunks
//! - **Adaptive threshold**: local `mean + k * std` over ~1 second of flux
//! - **Peak picking**: thresholded local maxima with minimum spacing
//! - **Zero-crossing snapping**: click-free boundary refinement
//!
//! All functions operate on plain `&[f32]` buffers.
//!
//! ## Example
//!
//! ```rust
//! use chopper_analysis::{
//!     adaptive_threshold, flux_sequence, pick_peaks, window_frames, Execution, FrameAnalyzer,
//! };
//!
//! let mono = vec![0.0f32; 44100];
//! let analyzer = FrameAnalyzer::default();
//!
//! let flux = flux_sequence(&analyzer, &mono, Execution::Parallel);
//! let threshold = adaptive_threshold(&flux, 0.5, window_frames(44100, analyzer.hop_size()));
//! let peaks = pick_peaks(&flux, &threshold, 4);
//! assert!(peaks.is_empty());
//! ```

pub mod fft;
pub mod flux;
pub mod frames;
pub mod mono;
pub mod peaks;
pub mod threshold;
pub mod zero_crossing;

pub use fft::Radix2Fft;
pub use flux::{flux_sequence, flux_sequence_cancellable, spectral_flux, Execution};
pub use frames::{hann_window, FrameAnalyzer, FrameScratch};
pub use mono::downmix;
pub use peaks::{min_distance_frames, pick_peaks};
pub use threshold::{adaptive_threshold, sensitivity_multiplier, window_frames};
pub use zero_crossing::find_zero_crossing;
