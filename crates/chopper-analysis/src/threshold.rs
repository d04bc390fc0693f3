//! Adaptive onset threshold.
//!
//! `threshold[i] = mean + k * std` over a centered window of roughly one
//! second of flux values, where `k = 2.0 - 1.5 * sensitivity`.

/// Z-score multiplier for a sensitivity in 0.0 - 1.0
#[inline]
pub fn sensitivity_multiplier(sensitivity: f32) -> f32 {
    2.0 - sensitivity.clamp(0.0, 1.0) * 1.5
}

/// Number of flux frames in about one second of audio
pub fn window_frames(sample_rate: u32, hop_size: usize) -> usize {
    ((sample_rate as f64 / hop_size.max(1) as f64).round() as usize).max(1)
}

/// Local `mean + k * std` threshold for each flux value.
///
/// The window spans exactly `window_size` frames, `i - window_size / 2` up to
/// but excluding `i + window_size - window_size / 2`, so an even window has
/// one more frame before `i` than after it. It shrinks near the ends of the
/// sequence instead of reaching past them.
pub fn adaptive_threshold(flux: &[f32], sensitivity: f32, window_size: usize) -> Vec<f32> {
    let k = sensitivity_multiplier(sensitivity) as f64;
    let window_size = window_size.max(1);
    let half = window_size / 2;

    // Prefix sums keep each window O(1)
    let mut sum = Vec::with_capacity(flux.len() + 1);
    let mut sum_sq = Vec::with_capacity(flux.len() + 1);
    sum.push(0.0f64);
    sum_sq.push(0.0f64);
    for &f in flux {
        let f = f as f64;
        sum.push(sum[sum.len() - 1] + f);
        sum_sq.push(sum_sq[sum_sq.len() - 1] + f * f);
    }

    (0..flux.len())
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = i.saturating_add(window_size - half).min(flux.len());
            let n = (end - start) as f64;
            let mean = (sum[end] - sum[start]) / n;
            let variance = ((sum_sq[end] - sum_sq[start]) / n - mean * mean).max(0.0);
            (mean + k * variance.sqrt()) as f32
        })
        .collect()
}
