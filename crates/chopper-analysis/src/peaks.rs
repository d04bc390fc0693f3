//! Onset peak picking over a flux curve.

/// Minimum peak spacing in flux frames for a minimum slice length
pub fn min_distance_frames(min_slice_ms: f32, sample_rate: u32, hop_size: usize) -> usize {
    (min_slice_ms as f64 / 1000.0 * sample_rate as f64 / hop_size.max(1) as f64).round() as usize
}

/// Local flux maxima above the threshold, at least `min_distance` apart.
///
/// Index `i` (excluding the first and last) is a candidate when
/// `flux[i] > threshold[i]`, `flux[i] > flux[i - 1]` and
/// `flux[i] >= flux[i + 1]`; the asymmetric comparison picks the first index
/// of a plateau. Candidates closer than `min_distance` to the previously
/// accepted peak are skipped. Returned indices are ascending flux-frame
/// indices, not sample positions.
pub fn pick_peaks(flux: &[f32], threshold: &[f32], min_distance: usize) -> Vec<usize> {
    let len = flux.len().min(threshold.len());
    if len < 3 {
        return Vec::new();
    }

    let mut peaks = Vec::new();
    let mut last: Option<usize> = None;

    for i in 1..len - 1 {
        let value = flux[i];
        let is_peak = value > threshold[i] && value > flux[i - 1] && value >= flux[i + 1];
        if !is_peak {
            continue;
        }
        if last.is_some_and(|prev| i - prev < min_distance) {
            continue;
        }
        peaks.push(i);
        last = Some(i);
    }

    peaks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_min_distance_frames() {
        // 50 ms at 44.1 kHz is 2205 samples, 4.3 hops
        assert_eq!(min_distance_frames(50.0, 44100, 512), 4);
        assert_eq!(min_distance_frames(100.0, 44100, 512), 9);
    }

    #[test]
    fn test_simple_peaks() {
        let flux = [0.0, 5.0, 0.0, 0.0, 6.0, 1.0, 0.0];
        let threshold = [1.0; 7];
        assert_eq!(pick_peaks(&flux, &threshold, 1), vec![1, 4]);
    }

    #[test]
    fn test_below_threshold_ignored() {
        let flux = [0.0, 5.0, 0.0, 0.0, 6.0, 1.0, 0.0];
        let threshold = [5.5; 7];
        assert_eq!(pick_peaks(&flux, &threshold, 1), vec![4]);
    }

    #[test]
    fn test_plateau_yields_single_peak() {
        let flux = [0.0, 3.0, 3.0, 3.0, 0.0];
        let threshold = [1.0; 5];
        assert_eq!(pick_peaks(&flux, &threshold, 0), vec![1]);
    }

    #[test]
    fn test_min_distance_keeps_earlier_peak() {
        let flux = [0.0, 4.0, 0.0, 9.0, 0.0, 0.0, 0.0, 5.0, 0.0];
        let threshold = [1.0; 9];
        assert_eq!(pick_peaks(&flux, &threshold, 3), vec![1, 7]);
    }

    #[test]
    fn test_endpoints_never_peaks() {
        let flux = [9.0, 1.0, 9.0];
        let threshold = [0.0; 3];
        assert!(pick_peaks(&flux, &threshold, 0).is_empty());
    }

    proptest! {
        #[test]
        fn peaks_are_ascending_and_spaced(
            flux in prop::collection::vec(0.0f32..10.0, 3..300),
            min_distance in 0usize..20,
        ) {
            let threshold = vec![2.0; flux.len()];
            let peaks = pick_peaks(&flux, &threshold, min_distance);
            for pair in peaks.windows(2) {
                prop_assert!(pair[0] < pair[1]);
                prop_assert!(pair[1] - pair[0] >= min_distance);
            }
            for &p in &peaks {
                prop_assert!(p >= 1 && p < flux.len() - 1);
                prop_assert!(flux[p] > threshold[p]);
            }
        }
    }
}
