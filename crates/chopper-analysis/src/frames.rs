//! Short-time magnitude spectra.
//!
//! The mono signal is cut into overlapping frames of `frame_size` samples,
//! `hop_size` apart. Each frame is Hann-windowed and transformed with
//! [`Radix2Fft`]; only the `frame_size / 2` positive-frequency bins are kept.

use crate::fft::Radix2Fft;
use chopper_core::FrameParams;

/// Windowed FFT over hop-spaced frames of a mono signal.
#[derive(Debug, Clone)]
pub struct FrameAnalyzer {
    params: FrameParams,
    fft: Radix2Fft,
    window: Vec<f32>,
}

/// Reusable FFT buffers for one thread.
#[derive(Debug, Clone)]
pub struct FrameScratch {
    re: Vec<f32>,
    im: Vec<f32>,
}

impl FrameAnalyzer {
    pub fn new(params: FrameParams) -> Self {
        let frame_size = params.frame_size();
        Self {
            params,
            fft: Radix2Fft::padded(frame_size),
            window: hann_window(frame_size),
        }
    }

    pub fn params(&self) -> FrameParams {
        self.params
    }

    pub fn frame_size(&self) -> usize {
        self.params.frame_size()
    }

    pub fn hop_size(&self) -> usize {
        self.params.hop_size()
    }

    /// Number of spectrum bins per frame
    pub fn num_bins(&self) -> usize {
        self.params.frame_size() / 2
    }

    /// Number of analysis frames for a signal of `total_frames` samples
    pub fn num_frames(&self, total_frames: usize) -> usize {
        self.params.num_frames(total_frames)
    }

    pub fn scratch(&self) -> FrameScratch {
        let n = self.frame_size();
        FrameScratch {
            re: vec![0.0; n],
            im: vec![0.0; n],
        }
    }

    /// Magnitude spectrum of frame `index`, written into `out`.
    ///
    /// Samples past the end of `mono` are treated as zero.
    pub fn spectrum_into(
        &self,
        mono: &[f32],
        index: usize,
        scratch: &mut FrameScratch,
        out: &mut [f32],
    ) {
        let start = index * self.hop_size();
        let available = mono.get(start..).unwrap_or(&[]);

        for (i, (re, w)) in scratch.re.iter_mut().zip(&self.window).enumerate() {
            *re = available.get(i).copied().unwrap_or(0.0) * w;
        }
        scratch.im.fill(0.0);

        self.fft.process(&mut scratch.re, &mut scratch.im);

        for (k, mag) in out.iter_mut().enumerate().take(self.num_bins()) {
            *mag = scratch.re[k].hypot(scratch.im[k]);
        }
    }

    /// Magnitude spectrum of frame `index`.
    pub fn spectrum(&self, mono: &[f32], index: usize) -> Vec<f32> {
        let mut scratch = self.scratch();
        let mut out = vec![0.0; self.num_bins()];
        self.spectrum_into(mono, index, &mut scratch, &mut out);
        out
    }

    /// Magnitude spectra of every frame.
    pub fn spectra(&self, mono: &[f32]) -> Vec<Vec<f32>> {
        let mut scratch = self.scratch();
        (0..self.num_frames(mono.len()))
            .map(|index| {
                let mut out = vec![0.0; self.num_bins()];
                self.spectrum_into(mono, index, &mut scratch, &mut out);
                out
            })
            .collect()
    }
}

impl Default for FrameAnalyzer {
    fn default() -> Self {
        Self::new(FrameParams::default())
    }
}

/// Hann window, `0.5 * (1 - cos(2πi / (N - 1)))`
pub fn hann_window(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }
    (0..size)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / (size - 1) as f64;
            (0.5 * (1.0 - angle.cos())) as f32
        })
        .collect()
}
