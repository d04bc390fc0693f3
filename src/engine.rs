//! SliceEngine: holds the loaded signal and runs slicing against it

use crate::analysis::Execution;
use crate::core::{
    AnalysisConfig, CancelToken, FrameParams, Signal, SignalSource, Slice, SliceId, SliceList,
    SliceMode,
};
use crate::slicer::{
    add_manual_slice, estimate_bpm, extract_slice_audio, generate_slices, remove_slice,
    AnalysisResult, ExtractOptions, TransientDetector, DEFAULT_BPM,
};
use crate::Result;
use std::sync::Arc;

const MIN_GRID_BPM: f64 = 20.0;
const MAX_GRID_BPM: f64 = 999.0;

/// Stateful slicing front end.
///
/// Operations that need audio return an empty or `None` result while no
/// signal is loaded. The signal is held behind an `Arc`, so callers can keep
/// rendering slices from a clone while a new one is loaded.
///
/// # Example
///
/// ```
/// use chopper::prelude::*;
///
/// let mut engine = SliceEngine::new();
/// engine.set_signal(Signal::silence(44100, 2, 2 * 44100).unwrap());
///
/// let config = AnalysisConfig::default()
///     .with_mode(SliceMode::Grid)
///     .with_grid_division(4);
/// let slices = engine.analyze(&config, Some(120.0));
/// assert_eq!(slices.len(), 4);
/// assert_eq!(engine.estimate_bpm(&slices), 120);
/// ```
pub struct SliceEngine {
    detector: TransientDetector,
    signal: Option<Arc<Signal>>,
}

impl Default for SliceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SliceEngine {
    pub fn builder() -> crate::SliceEngineBuilder {
        crate::SliceEngineBuilder::default()
    }

    /// Engine with default framing and parallel flux computation.
    pub fn new() -> Self {
        Self::from_parts(FrameParams::default(), Execution::default())
    }

    pub(crate) fn from_parts(params: FrameParams, execution: Execution) -> Self {
        let mut detector = TransientDetector::with_params(params);
        detector.set_execution(execution);
        Self {
            detector,
            signal: None,
        }
    }

    /// Replace the loaded signal.
    pub fn set_signal(&mut self, signal: impl Into<Arc<Signal>>) {
        let signal = signal.into();
        tracing::debug!(
            sample_rate = signal.sample_rate(),
            channels = signal.num_channels(),
            frames = signal.frame_count(),
            "signal loaded"
        );
        self.signal = Some(signal);
    }

    /// Copy audio from any [`SignalSource`] and load it.
    pub fn set_signal_from_source<S: SignalSource + ?Sized>(&mut self, source: &S) -> Result<()> {
        let signal = Signal::from_source(source)?;
        self.set_signal(signal);
        Ok(())
    }

    pub fn clear_signal(&mut self) {
        self.signal = None;
    }

    pub fn signal(&self) -> Option<&Arc<Signal>> {
        self.signal.as_ref()
    }

    pub fn frame_params(&self) -> FrameParams {
        self.detector.params()
    }

    /// Slice the loaded signal with the mode selected in `config`.
    ///
    /// `bpm` drives grid mode. It is clamped to 20 - 999, and a missing or
    /// non-finite tempo falls back to 120.
    pub fn analyze(&self, config: &AnalysisConfig, bpm: Option<f64>) -> SliceList {
        let Some(signal) = self.loaded("analyze") else {
            return SliceList::empty(0);
        };
        generate_slices(&self.detector, signal, config, Some(grid_bpm(bpm)))
    }

    /// Like [`analyze`](Self::analyze), but stops with
    /// [`Error::Cancelled`](crate::Error::Cancelled) once `token` is set.
    pub fn analyze_cancellable(
        &self,
        config: &AnalysisConfig,
        bpm: Option<f64>,
        token: &CancelToken,
    ) -> Result<SliceList> {
        let Some(signal) = self.loaded("analyze") else {
            return Ok(SliceList::empty(0));
        };
        if token.is_cancelled() {
            return Err(crate::Error::Cancelled);
        }
        match config.mode {
            SliceMode::Transient => self
                .detector
                .detect_cancellable(signal, config, token)
                .map(|result| result.slices),
            _ => Ok(generate_slices(
                &self.detector,
                signal,
                config,
                Some(grid_bpm(bpm)),
            )),
        }
    }

    /// Full transient analysis including the flux and threshold curves,
    /// whatever mode `config` names.
    pub fn analyze_with_details(&self, config: &AnalysisConfig) -> Option<AnalysisResult> {
        let signal = self.loaded("analyze_with_details")?;
        Some(self.detector.detect(signal, config))
    }

    /// Tempo implied by the spacing of `slices`.
    pub fn estimate_bpm(&self, slices: &SliceList) -> u32 {
        estimate_bpm(slices, slices.sample_rate())
    }

    /// Render one slice of the loaded signal.
    ///
    /// `None` without a signal or when the slice does not fit it.
    pub fn extract_slice(&self, slice: &Slice, options: &ExtractOptions) -> Option<Signal> {
        let signal = self.loaded("extract_slice")?;
        match extract_slice_audio(signal, slice, options) {
            Ok(audio) => Some(audio),
            Err(err) => {
                tracing::warn!(slice_id = ?slice.id, %err, "slice extraction failed");
                None
            }
        }
    }

    /// Render every slice that fits the loaded signal, in order.
    pub fn extract_all(&self, slices: &SliceList, options: &ExtractOptions) -> Vec<Signal> {
        slices
            .iter()
            .filter_map(|slice| self.extract_slice(slice, options))
            .collect()
    }

    /// Split the slice containing `frame_position`.
    ///
    /// Returns `slices` unchanged when no signal is loaded.
    pub fn add_manual_slice(
        &self,
        slices: &SliceList,
        frame_position: usize,
        config: &AnalysisConfig,
    ) -> SliceList {
        match self.loaded("add_manual_slice") {
            Some(signal) => add_manual_slice(slices, frame_position, signal, config),
            None => slices.clone(),
        }
    }

    /// Merge a slice into its neighbour.
    pub fn remove_slice(&self, slices: &SliceList, id: SliceId) -> SliceList {
        remove_slice(slices, id)
    }

    fn loaded(&self, operation: &'static str) -> Option<&Signal> {
        let signal = self.signal.as_deref();
        if signal.is_none() {
            tracing::warn!(operation, "no signal loaded");
        }
        signal
    }
}

fn grid_bpm(bpm: Option<f64>) -> f64 {
    match bpm {
        Some(bpm) if bpm.is_finite() => bpm.clamp(MIN_GRID_BPM, MAX_GRID_BPM),
        _ => DEFAULT_BPM as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_bpm() {
        assert_eq!(grid_bpm(None), 120.0);
        assert_eq!(grid_bpm(Some(f64::NAN)), 120.0);
        assert_eq!(grid_bpm(Some(5.0)), 20.0);
        assert_eq!(grid_bpm(Some(5000.0)), 999.0);
        assert_eq!(grid_bpm(Some(93.5)), 93.5);
    }

    #[test]
    fn test_no_signal() {
        let engine = SliceEngine::new();
        let config = AnalysisConfig::default();
        assert!(engine.analyze(&config, None).is_empty());
        assert!(engine.analyze_with_details(&config).is_none());
        assert!(engine
            .extract_slice(&Slice::new(0, 10, 44100, 1.0), &ExtractOptions::default())
            .is_none());
    }

    #[test]
    fn test_cancelled_before_start() {
        let mut engine = SliceEngine::new();
        engine.set_signal(Signal::silence(44100, 1, 44100).unwrap());
        let token = CancelToken::new();
        token.cancel();
        let result = engine.analyze_cancellable(&AnalysisConfig::default(), None, &token);
        assert_eq!(result, Err(crate::Error::Cancelled));
    }
}
