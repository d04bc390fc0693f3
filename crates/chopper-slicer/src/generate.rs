//! Mode dispatch.

use crate::bpm::DEFAULT_BPM;
use crate::grid::generate_grid_slices;
use crate::manual::manual_slices;
use crate::transient::TransientDetector;
use chopper_core::{AnalysisConfig, Signal, SliceList, SliceMode};

/// Generate slices with the method selected by `config.mode`.
///
/// `bpm` is only used in grid mode and defaults to [`DEFAULT_BPM`].
pub fn generate_slices(
    detector: &TransientDetector,
    signal: &Signal,
    config: &AnalysisConfig,
    bpm: Option<f64>,
) -> SliceList {
    match config.mode {
        SliceMode::Transient => detector.detect(signal, config).slices,
        SliceMode::Grid => generate_grid_slices(
            signal,
            bpm.unwrap_or(DEFAULT_BPM as f64),
            config.grid_division,
            config,
        ),
        SliceMode::Manual => manual_slices(signal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let signal = Signal::silence(44100, 1, 44100).unwrap();
        let detector = TransientDetector::new();
        let base = AnalysisConfig::default().with_snap_to_zero_crossing(false);

        let manual = generate_slices(
            &detector,
            &signal,
            &base.clone().with_mode(SliceMode::Manual),
            None,
        );
        assert_eq!(manual.len(), 1);

        // 120 BPM quarter notes over one second
        let grid = generate_slices(
            &detector,
            &signal,
            &base.clone().with_mode(SliceMode::Grid).with_grid_division(4),
            None,
        );
        assert_eq!(grid.len(), 2);

        let transient = generate_slices(&detector, &signal, &base, Some(90.0));
        assert_eq!(transient.len(), 1);
    }
}
