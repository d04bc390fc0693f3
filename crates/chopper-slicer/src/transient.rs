//! Transient slicing
//!
//! Slices a signal at detected onsets:
//! downmix → framed FFT → spectral flux → adaptive threshold → peak picking
//! → (optional) zero-crossing snapping → contiguous slices.
//!
//! ## Use Cases
//!
//! - Chopping drum loops at hits
//! - Extracting one-shots from a recorded phrase
//! - Feeding slice starts to tempo estimation

use crate::boundaries::{build_slices, snap_interior};
use crate::manual::manual_slices;
use chopper_analysis::{
    adaptive_threshold, downmix, flux_sequence, flux_sequence_cancellable, min_distance_frames,
    pick_peaks, window_frames, Execution, FrameAnalyzer,
};
use chopper_core::{AnalysisConfig, CancelToken, FrameParams, Result, Signal, SliceList};

/// Output of transient analysis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct AnalysisResult {
    /// Slices covering the whole signal
    pub slices: SliceList,
    /// Onset strength per analysis frame
    pub spectral_flux: Vec<f32>,
    /// Adaptive threshold per analysis frame
    pub threshold: Vec<f32>,
    /// Flux-frame indices of the peaks that became slice boundaries
    pub peaks: Vec<usize>,
}

impl AnalysisResult {
    /// Result for signals too short to analyze: no curves, one slice
    fn insufficient(signal: &Signal) -> Self {
        Self {
            slices: manual_slices(signal),
            spectral_flux: Vec::new(),
            threshold: Vec::new(),
            peaks: Vec::new(),
        }
    }

    /// Sample position of each peak
    pub fn peak_frames(&self, hop_size: usize) -> Vec<usize> {
        self.peaks.iter().map(|&p| p * hop_size).collect()
    }
}

/// Onset-based slicer.
#[derive(Debug, Clone)]
pub struct TransientDetector {
    analyzer: FrameAnalyzer,
    execution: Execution,
}

impl TransientDetector {
    /// Detector with 2048-sample frames and a 512-sample hop
    pub fn new() -> Self {
        Self::with_params(FrameParams::default())
    }

    /// Detector with custom framing
    pub fn with_params(params: FrameParams) -> Self {
        Self {
            analyzer: FrameAnalyzer::new(params),
            execution: Execution::default(),
        }
    }

    /// Set how frame spectra are computed
    pub fn set_execution(&mut self, execution: Execution) {
        self.execution = execution;
    }

    pub fn params(&self) -> FrameParams {
        self.analyzer.params()
    }

    /// Analyze `signal` and slice it at onsets.
    pub fn detect(&self, signal: &Signal, config: &AnalysisConfig) -> AnalysisResult {
        let mono = downmix(signal);
        let flux = flux_sequence(&self.analyzer, &mono, self.execution);
        self.finish(signal, &mono, &config.sanitized(), flux)
    }

    /// Like [`detect`](Self::detect), checking `token` once per analysis
    /// frame. A cancelled analysis yields [`Error::Cancelled`] and no result.
    ///
    /// [`Error::Cancelled`]: chopper_core::Error::Cancelled
    pub fn detect_cancellable(
        &self,
        signal: &Signal,
        config: &AnalysisConfig,
        token: &CancelToken,
    ) -> Result<AnalysisResult> {
        let mono = downmix(signal);
        let flux = flux_sequence_cancellable(&self.analyzer, &mono, self.execution, token)?;
        Ok(self.finish(signal, &mono, &config.sanitized(), flux))
    }

    fn finish(
        &self,
        signal: &Signal,
        mono: &[f32],
        config: &AnalysisConfig,
        flux: Vec<f32>,
    ) -> AnalysisResult {
        if flux.len() < 2 {
            tracing::debug!(
                frames = signal.frame_count(),
                "signal too short for transient analysis"
            );
            return AnalysisResult::insufficient(signal);
        }

        let sample_rate = signal.sample_rate();
        let frame_count = signal.frame_count();
        let hop = self.analyzer.hop_size();

        let threshold = adaptive_threshold(
            &flux,
            config.sensitivity,
            window_frames(sample_rate, hop),
        );
        let min_distance = min_distance_frames(config.min_slice_ms, sample_rate, hop);
        let candidates = pick_peaks(&flux, &threshold, min_distance);

        // Peak spacing is rounded to whole hops; re-check in samples so no
        // slice (including the first and last) falls under the minimum.
        let min_frames = config.min_frames(sample_rate).max(1);
        let mut peaks = Vec::with_capacity(candidates.len());
        let mut boundaries = Vec::with_capacity(candidates.len() + 2);
        let mut confidences = Vec::with_capacity(candidates.len() + 1);
        boundaries.push(0);
        confidences.push(1.0);

        let mut last = 0usize;
        for p in candidates.iter().copied() {
            let frame = p * hop;
            if frame - last < min_frames || frame_count.saturating_sub(frame) < min_frames {
                continue;
            }
            peaks.push(p);
            boundaries.push(frame);
            confidences.push(onset_confidence(flux[p], threshold[p]));
            last = frame;
        }
        boundaries.push(frame_count);

        if config.snap_to_zero_crossing {
            snap_interior(&mut boundaries, mono, config.snap_radius, min_frames);
        }

        let slices = build_slices(&boundaries, sample_rate, &confidences);
        tracing::debug!(
            frames = flux.len(),
            candidates = candidates.len(),
            peaks = peaks.len(),
            slices = slices.len(),
            "transient analysis complete"
        );

        AnalysisResult {
            slices,
            spectral_flux: flux,
            threshold,
            peaks,
        }
    }
}

impl Default for TransientDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Confidence from how far flux clears the threshold, centered on 0.5.
fn onset_confidence(flux: f32, threshold: f32) -> f32 {
    if threshold <= f32::EPSILON {
        return 1.0;
    }
    ((flux - threshold) / threshold + 0.5).clamp(0.0, 1.0)
}

/// Slice `signal` at detected onsets with default framing.
pub fn detect_transients(signal: &Signal, config: &AnalysisConfig) -> AnalysisResult {
    TransientDetector::new().detect(signal, config)
}
