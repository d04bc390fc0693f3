//! Half-wave rectified spectral flux.
//!
//! Only energy increases count towards flux; decreases are ignored since
//! onsets show up as rising energy.

use crate::frames::FrameAnalyzer;
use chopper_core::{CancelToken, Error, Result};

/// Frames per parallel work unit
#[cfg(feature = "parallel")]
const PARALLEL_CHUNK_FRAMES: usize = 64;

/// Sum of positive bin-wise increases from `previous` to `current`.
#[inline]
pub fn spectral_flux(current: &[f32], previous: &[f32]) -> f32 {
    current
        .iter()
        .zip(previous)
        .map(|(&c, &p)| (c - p).max(0.0))
        .sum()
}

/// How frame spectra are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// One frame after another on the calling thread
    Sequential,
    /// Chunks of frames on the rayon pool (sequential without the
    /// `parallel` feature)
    #[default]
    Parallel,
}

/// Flux of every analysis frame in `mono`.
///
/// The first frame is compared against an all-zero spectrum.
pub fn flux_sequence(analyzer: &FrameAnalyzer, mono: &[f32], execution: Execution) -> Vec<f32> {
    let never = || false;
    compute(analyzer, mono, execution, &never).unwrap_or_default()
}

/// Like [`flux_sequence`], checking `token` once per frame.
///
/// Returns [`Error::Cancelled`] and discards all work if the token fires.
pub fn flux_sequence_cancellable(
    analyzer: &FrameAnalyzer,
    mono: &[f32],
    execution: Execution,
    token: &CancelToken,
) -> Result<Vec<f32>> {
    let check = || token.is_cancelled();
    compute(analyzer, mono, execution, &check)
}

fn compute<F>(
    analyzer: &FrameAnalyzer,
    mono: &[f32],
    execution: Execution,
    cancelled: &F,
) -> Result<Vec<f32>>
where
    F: Fn() -> bool + Sync,
{
    let num_frames = analyzer.num_frames(mono.len());
    tracing::trace!(num_frames, ?execution, "computing spectral flux");

    match execution {
        Execution::Sequential => flux_range(analyzer, mono, 0, num_frames, cancelled),
        Execution::Parallel => parallel_flux(analyzer, mono, num_frames, cancelled),
    }
}

#[cfg(feature = "parallel")]
fn parallel_flux<F>(
    analyzer: &FrameAnalyzer,
    mono: &[f32],
    num_frames: usize,
    cancelled: &F,
) -> Result<Vec<f32>>
where
    F: Fn() -> bool + Sync,
{
    use rayon::prelude::*;

    let num_chunks = num_frames.div_ceil(PARALLEL_CHUNK_FRAMES);
    let chunks = (0..num_chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * PARALLEL_CHUNK_FRAMES;
            let end = (start + PARALLEL_CHUNK_FRAMES).min(num_frames);
            flux_range(analyzer, mono, start, end, cancelled)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(chunks.concat())
}

#[cfg(not(feature = "parallel"))]
fn parallel_flux<F>(
    analyzer: &FrameAnalyzer,
    mono: &[f32],
    num_frames: usize,
    cancelled: &F,
) -> Result<Vec<f32>>
where
    F: Fn() -> bool + Sync,
{
    flux_range(analyzer, mono, 0, num_frames, cancelled)
}

/// Flux for frames `start..end`. The spectrum of frame `start - 1` is
/// recomputed so chunks can run independently.
fn flux_range<F>(
    analyzer: &FrameAnalyzer,
    mono: &[f32],
    start: usize,
    end: usize,
    cancelled: &F,
) -> Result<Vec<f32>>
where
    F: Fn() -> bool,
{
    let bins = analyzer.num_bins();
    let mut scratch = analyzer.scratch();
    let mut previous = vec![0.0f32; bins];
    let mut current = vec![0.0f32; bins];

    if start > 0 {
        analyzer.spectrum_into(mono, start - 1, &mut scratch, &mut previous);
    }

    let mut flux = Vec::with_capacity(end.saturating_sub(start));
    for index in start..end {
        if cancelled() {
            return Err(Error::Cancelled);
        }
        analyzer.spectrum_into(mono, index, &mut scratch, &mut current);
        flux.push(spectral_flux(&current, &previous));
        std::mem::swap(&mut previous, &mut current);
    }
    Ok(flux)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chopper_core::FrameParams;

    fn clicks(len: usize, every: usize) -> Vec<f32> {
        let mut mono = vec![0.0f32; len];
        for start in (every / 2..len).step_by(every) {
            for i in 0..200.min(len - start) {
                mono[start + i] = (-0.02 * i as f32).exp() * if i % 2 == 0 { 0.8 } else { -0.8 };
            }
        }
        mono
    }

    #[test]
    fn test_half_wave_rectification() {
        let current = [1.0, 0.0, 3.0];
        let previous = [0.5, 2.0, 1.0];
        assert_eq!(spectral_flux(&current, &previous), 2.5);
        assert_eq!(spectral_flux(&previous, &previous), 0.0);
    }

    #[test]
    fn test_first_frame_compares_against_silence() {
        let analyzer = FrameAnalyzer::new(FrameParams::new(256, 64));
        let mono = vec![0.5f32; 1024];
        let flux = flux_sequence(&analyzer, &mono, Execution::Sequential);
        let first: f32 = analyzer.spectrum(&mono, 0).iter().sum();
        assert!((flux[0] - first).abs() < 1e-3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let analyzer = FrameAnalyzer::new(FrameParams::new(512, 128));
        let mono = clicks(44100, 5000);
        let sequential = flux_sequence(&analyzer, &mono, Execution::Sequential);
        let parallel = flux_sequence(&analyzer, &mono, Execution::Parallel);
        assert_eq!(sequential.len(), analyzer.num_frames(mono.len()));
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_silence_has_zero_flux() {
        let analyzer = FrameAnalyzer::default();
        let flux = flux_sequence(&analyzer, &vec![0.0; 8192], Execution::Parallel);
        assert!(flux.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_cancelled_token_aborts() {
        let analyzer = FrameAnalyzer::default();
        let token = CancelToken::new();
        token.cancel();
        for execution in [Execution::Sequential, Execution::Parallel] {
            let result = flux_sequence_cancellable(&analyzer, &vec![0.1; 16384], execution, &token);
            assert_eq!(result, Err(Error::Cancelled));
        }
    }
}
