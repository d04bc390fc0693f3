//! # Chopper Slicer
//!
//! Turns a decoded loop into an ordered, contiguous list of slices:
//! - **Transient mode**: boundaries at spectral-flux onsets
//! - **Grid mode**: fixed-length slices on a tempo grid
//! - **Manual mode**: one slice, shaped by split/merge edits
//!
//! Plus tempo estimation from slice spacing and rendering of a single slice
//! with fades and normalization.
//!
//! Every produced or edited list is sorted, gap-free, starts at frame 0 and
//! ends at the signal's frame count.
//!
//! ## Example
//!
//! ```rust
//! use chopper_core::{AnalysisConfig, Signal};
//! use chopper_slicer::{add_manual_slice, estimate_bpm, generate_grid_slices, remove_slice};
//!
//! let signal = Signal::silence(44100, 2, 4 * 44100).unwrap();
//! let config = AnalysisConfig::default().with_min_slice_ms(10.0);
//!
//! let slices = generate_grid_slices(&signal, 120.0, 16, &config);
//! assert_eq!(slices.len(), 32);
//! assert_eq!(estimate_bpm(&slices, signal.sample_rate()), 120);
//!
//! let merged = remove_slice(&slices, slices[1].id);
//! assert_eq!(merged.len(), 31);
//!
//! let split = add_manual_slice(&merged, 8000, &signal, &config);
//! assert_eq!(split.len(), 32);
//! ```

mod boundaries;
pub mod bpm;
pub mod editor;
pub mod extract;
pub mod generate;
pub mod grid;
pub mod manual;
pub mod transient;

pub use bpm::{estimate_bpm, DEFAULT_BPM};
pub use editor::{add_manual_slice, remove_slice};
pub use extract::{extract_slice_audio, ExtractOptions};
pub use generate::generate_slices;
pub use grid::{generate_grid_slices, grid_frames_per_slice};
pub use manual::manual_slices;
pub use transient::{detect_transients, AnalysisResult, TransientDetector};
