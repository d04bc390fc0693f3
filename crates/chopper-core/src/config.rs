//! Analysis configuration.

use crate::{Error, Result};

/// Default STFT frame size in samples
pub const DEFAULT_FRAME_SIZE: usize = 2048;

/// Default hop size (samples between analysis frames)
pub const DEFAULT_HOP_SIZE: usize = 512;

/// Default zero-crossing search radius in samples
pub const DEFAULT_SNAP_RADIUS: usize = 256;

/// Largest accepted STFT frame size in samples (2^20)
pub const MAX_FRAME_SIZE: usize = 1 << 20;

/// Largest accepted grid division (slices per four beats)
pub const MAX_GRID_DIVISION: u32 = 128;

/// How slices are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SliceMode {
    /// Boundaries at detected onsets (spectral flux)
    #[default]
    Transient,
    /// Fixed-length slices on a tempo grid
    Grid,
    /// One slice covering the signal, shaped by manual edits
    Manual,
}

/// Parameters controlling slice generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AnalysisConfig {
    pub mode: SliceMode,
    /// Onset sensitivity (0.0 - 1.0, higher = more onsets)
    pub sensitivity: f32,
    /// Minimum slice length in milliseconds
    pub min_slice_ms: f32,
    /// Move boundaries to the nearest zero-crossing
    pub snap_to_zero_crossing: bool,
    /// Slices per four beats in grid mode (16 = sixteenth notes)
    pub grid_division: u32,
    /// Zero-crossing search radius in samples
    pub snap_radius: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: SliceMode::Transient,
            sensitivity: 0.5,
            min_slice_ms: 50.0,
            snap_to_zero_crossing: true,
            grid_division: 16,
            snap_radius: DEFAULT_SNAP_RADIUS,
        }
    }
}

impl AnalysisConfig {
    pub fn with_mode(mut self, mode: SliceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Clamped to 0.0 - 1.0
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = clamp_sensitivity(sensitivity);
        self
    }

    /// Clamped to at least 1 ms
    pub fn with_min_slice_ms(mut self, min_slice_ms: f32) -> Self {
        self.min_slice_ms = clamp_min_slice_ms(min_slice_ms);
        self
    }

    pub fn with_snap_to_zero_crossing(mut self, snap: bool) -> Self {
        self.snap_to_zero_crossing = snap;
        self
    }

    /// Clamped to 1 - 128
    pub fn with_grid_division(mut self, division: u32) -> Self {
        self.grid_division = division.clamp(1, MAX_GRID_DIVISION);
        self
    }

    /// Clamped to at least 1 sample
    pub fn with_snap_radius(mut self, radius: usize) -> Self {
        self.snap_radius = radius.max(1);
        self
    }

    /// Copy with every field clamped into its valid range.
    pub fn sanitized(&self) -> Self {
        Self {
            mode: self.mode,
            sensitivity: clamp_sensitivity(self.sensitivity),
            min_slice_ms: clamp_min_slice_ms(self.min_slice_ms),
            snap_to_zero_crossing: self.snap_to_zero_crossing,
            grid_division: self.grid_division.clamp(1, MAX_GRID_DIVISION),
            snap_radius: self.snap_radius.max(1),
        }
    }

    /// Report the first out-of-range field instead of clamping it.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.sensitivity) {
            return Err(Error::InvalidConfig(format!(
                "sensitivity {} out of range (0.0-1.0)",
                self.sensitivity
            )));
        }
        if !(self.min_slice_ms.is_finite() && self.min_slice_ms > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "min_slice_ms {} must be positive",
                self.min_slice_ms
            )));
        }
        if self.grid_division == 0 || self.grid_division > MAX_GRID_DIVISION {
            return Err(Error::InvalidConfig(format!(
                "grid_division {} out of range (1-{MAX_GRID_DIVISION})",
                self.grid_division
            )));
        }
        if self.snap_radius == 0 {
            return Err(Error::InvalidConfig("snap_radius must be positive".into()));
        }
        Ok(())
    }

    /// Minimum slice length in frames at the given sample rate
    pub fn min_frames(&self, sample_rate: u32) -> usize {
        (self.min_slice_ms as f64 / 1000.0 * sample_rate as f64).round() as usize
    }
}

fn clamp_sensitivity(sensitivity: f32) -> f32 {
    if sensitivity.is_nan() {
        0.5
    } else {
        sensitivity.clamp(0.0, 1.0)
    }
}

fn clamp_min_slice_ms(min_slice_ms: f32) -> f32 {
    if min_slice_ms.is_nan() {
        50.0
    } else {
        min_slice_ms.max(1.0)
    }
}

/// STFT framing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct FrameParams {
    frame_size: usize,
    hop_size: usize,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            hop_size: DEFAULT_HOP_SIZE,
        }
    }
}

impl FrameParams {
    /// Frame size is rounded up to a power of two and clamped to
    /// `2..=MAX_FRAME_SIZE`; hop size is clamped to `1..=frame_size`.
    pub fn new(frame_size: usize, hop_size: usize) -> Self {
        let frame_size = frame_size
            .max(2)
            .checked_next_power_of_two()
            .map_or(MAX_FRAME_SIZE, |size| size.min(MAX_FRAME_SIZE));
        Self {
            frame_size,
            hop_size: hop_size.clamp(1, frame_size),
        }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Number of full frames that fit in `total_frames` samples
    pub fn num_frames(&self, total_frames: usize) -> usize {
        if total_frames < self.frame_size {
            0
        } else {
            (total_frames - self.frame_size) / self.hop_size + 1
        }
    }
}
