//! Tempo estimation from slice spacing.

use chopper_core::Slice;

/// Tempo returned when there is too little evidence to estimate one
pub const DEFAULT_BPM: u32 = 120;

/// Shortest inter-onset interval counted as a beat division (seconds, exclusive)
const MIN_INTERVAL_SECS: f64 = 0.1;

/// Longest inter-onset interval counted as a beat division (seconds, exclusive)
const MAX_INTERVAL_SECS: f64 = 2.0;

const MIN_BPM: f64 = 60.0;
const MAX_BPM: f64 = 200.0;

/// Estimate tempo from the spacing of slice starts.
///
/// Takes the median of the inter-onset intervals that fall strictly between
/// 0.1 s and 2 s, converts it to BPM and folds the result into 60 - 200 by
/// octave doubling or halving. Fewer than three slices, or no plausible
/// interval, yields [`DEFAULT_BPM`].
pub fn estimate_bpm(slices: &[Slice], sample_rate: u32) -> u32 {
    if slices.len() < 3 || sample_rate == 0 {
        return DEFAULT_BPM;
    }

    let sr = sample_rate as f64;
    let mut intervals: Vec<f64> = slices
        .windows(2)
        .map(|pair| (pair[1].start_frame as f64 - pair[0].start_frame as f64) / sr)
        .filter(|&ioi| ioi > MIN_INTERVAL_SECS && ioi < MAX_INTERVAL_SECS)
        .collect();

    if intervals.is_empty() {
        return DEFAULT_BPM;
    }

    intervals.sort_by(f64::total_cmp);
    let median = median_of_sorted(&intervals);

    let mut bpm = 60.0 / median;
    while bpm < MIN_BPM {
        bpm *= 2.0;
    }
    while bpm > MAX_BPM {
        bpm /= 2.0;
    }
    tracing::debug!(intervals = intervals.len(), median, bpm, "tempo estimated");
    bpm.round() as u32
}

fn median_of_sorted(values: &[f64]) -> f64 {
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
