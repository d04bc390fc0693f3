//! Boundary lists to slice lists, with optional zero-crossing snapping.
//!
//! A boundary list is ascending, starts at 0 and ends at the signal's frame
//! count. Slice `i` spans `boundaries[i]..boundaries[i + 1]`.

use chopper_analysis::find_zero_crossing;
use chopper_core::{Signal, Slice, SliceList};

/// Move interior boundaries to nearby zero-crossings of `mono`.
///
/// The first and last boundary never move. Each interior boundary is snapped
/// once; a snap is dropped if it would reach a neighbour or shrink an adjacent
/// slice below `min_frames` (or below its unsnapped length, if that was
/// already shorter).
pub(crate) fn snap_interior(boundaries: &mut [usize], mono: &[f32], radius: usize, min_frames: usize) {
    if boundaries.len() < 3 {
        return;
    }
    for j in 1..boundaries.len() - 1 {
        let (prev, current, next) = (boundaries[j - 1], boundaries[j], boundaries[j + 1]);
        let snapped = find_zero_crossing(mono, current, radius);
        if snapped == current {
            continue;
        }

        let left_min = min_frames.min(current - prev).max(1);
        let right_min = min_frames.min(next - current).max(1);
        let fits = snapped > prev
            && snapped < next
            && snapped - prev >= left_min
            && next - snapped >= right_min;

        if fits {
            boundaries[j] = snapped;
        } else {
            tracing::trace!(boundary = current, snapped, "zero-crossing snap skipped");
        }
    }
}

/// Snap a single position using only the channels' mix around it.
pub(crate) fn snap_position(signal: &Signal, position: usize, radius: usize) -> usize {
    let frame_count = signal.frame_count();
    if frame_count < 2 || position >= frame_count {
        return position;
    }
    let lo = position.saturating_sub(radius);
    let hi = position.saturating_add(radius).saturating_add(2).min(frame_count);

    let scale = 1.0 / signal.num_channels().max(1) as f32;
    let mut window = vec![0.0f32; hi - lo];
    for channel in signal.channels() {
        for (acc, &s) in window.iter_mut().zip(&channel[lo..hi]) {
            *acc += s;
        }
    }
    window.iter_mut().for_each(|s| *s *= scale);

    lo + find_zero_crossing(&window, position - lo, radius)
}

/// Build slices from boundaries. `confidences[i]` applies to slice `i`;
/// missing entries default to 1.0.
pub(crate) fn build_slices(boundaries: &[usize], sample_rate: u32, confidences: &[f32]) -> SliceList {
    let slices = boundaries
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] < pair[1])
        .map(|(i, pair)| {
            let confidence = confidences.get(i).copied().unwrap_or(1.0);
            Slice::new(pair[0], pair[1], sample_rate, confidence)
        })
        .collect();
    SliceList::new(sample_rate, slices)
}
