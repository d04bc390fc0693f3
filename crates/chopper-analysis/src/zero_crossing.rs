//! Zero-crossing boundary refinement.

/// Nearest zero-crossing to `target` within `radius` samples.
///
/// A crossing at `i` means `samples[i]` and `samples[i + 1]` lie on opposite
/// sides of zero (one `>= 0`, the other `< 0`). Ties resolve to the earlier
/// index. Returns `target` unchanged when no crossing is in range.
pub fn find_zero_crossing(samples: &[f32], target: usize, radius: usize) -> usize {
    if samples.len() < 2 {
        return target;
    }
    let lo = target.saturating_sub(radius);
    let hi = target.saturating_add(radius).min(samples.len() - 2);
    if lo > hi {
        return target;
    }

    (lo..=hi)
        .filter(|&i| (samples[i] >= 0.0) != (samples[i + 1] >= 0.0))
        .min_by_key(|&i| i.abs_diff(target))
        .unwrap_or(target)
}
