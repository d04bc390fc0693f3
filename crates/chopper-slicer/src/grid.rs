//! Tempo-grid slicing.

use crate::boundaries::{build_slices, snap_interior};
use crate::manual::manual_slices;
use chopper_analysis::downmix;
use chopper_core::{AnalysisConfig, Signal, SliceList, MAX_GRID_DIVISION};

/// Slice length in frames for a tempo and grid division.
///
/// `division` is slices per four beats (16 = sixteenth notes). Never shorter
/// than the configured minimum slice length. Returns `None` for a tempo that
/// yields no positive slice rate.
pub fn grid_frames_per_slice(
    sample_rate: u32,
    bpm: f64,
    division: u32,
    config: &AnalysisConfig,
) -> Option<usize> {
    let division = division.clamp(1, MAX_GRID_DIVISION);
    let slices_per_second = (bpm / 60.0) * (division as f64 / 4.0);
    if !(slices_per_second.is_finite() && slices_per_second > 0.0) {
        return None;
    }
    let nominal = (sample_rate as f64 / slices_per_second).round() as usize;
    Some(nominal.max(config.min_frames(sample_rate)).max(1))
}

/// Consecutive fixed-length slices from frame 0; the last slice is truncated
/// at the end of the signal.
///
/// With snapping enabled, interior boundaries move to nearby zero-crossings;
/// the first start and last end stay at 0 and the frame count.
pub fn generate_grid_slices(
    signal: &Signal,
    bpm: f64,
    division: u32,
    config: &AnalysisConfig,
) -> SliceList {
    let config = config.sanitized();
    let sample_rate = signal.sample_rate();
    let frame_count = signal.frame_count();
    if frame_count == 0 {
        return SliceList::empty(sample_rate);
    }

    let Some(step) = grid_frames_per_slice(sample_rate, bpm, division, &config) else {
        tracing::debug!(bpm, division, "no usable grid, returning a single slice");
        return manual_slices(signal);
    };

    let mut boundaries: Vec<usize> = (0..frame_count).step_by(step).collect();
    boundaries.push(frame_count);

    if config.snap_to_zero_crossing {
        let mono = downmix(signal);
        snap_interior(
            &mut boundaries,
            &mono,
            config.snap_radius,
            config.min_frames(sample_rate).max(1),
        );
    }

    let slices = build_slices(&boundaries, sample_rate, &[]);
    tracing::debug!(
        bpm,
        division,
        frames_per_slice = step,
        slices = slices.len(),
        "grid slices generated"
    );
    slices
}
