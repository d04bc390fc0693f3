//! Rendering a slice's audio.

use chopper_core::{Error, Result, Signal, Slice};

/// Fade and gain options for [`extract_slice_audio`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ExtractOptions {
    /// Linear fade-in length in milliseconds
    pub fade_in_ms: f32,
    /// Linear fade-out length in milliseconds
    pub fade_out_ms: f32,
    /// Scale so the loudest sample across all channels reaches 1.0
    pub normalize: bool,
}

impl ExtractOptions {
    pub fn with_fade_in_ms(mut self, ms: f32) -> Self {
        self.fade_in_ms = ms;
        self
    }

    pub fn with_fade_out_ms(mut self, ms: f32) -> Self {
        self.fade_out_ms = ms;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

/// Copy a slice's frames from every channel into a new signal.
///
/// Fade-in ramps from 0 over its window; fade-out ramps to 0 over the last
/// frames. Both windows are clamped to the slice length independently, so on
/// very short slices they can overlap and both attenuate the middle.
///
/// Fails for a slice with `start_frame >= end_frame` or one reaching past the
/// end of the signal.
pub fn extract_slice_audio(
    signal: &Signal,
    slice: &Slice,
    options: &ExtractOptions,
) -> Result<Signal> {
    let (start, end) = (slice.start_frame, slice.end_frame);
    if start >= end {
        return Err(Error::InvalidSlice { start, end });
    }
    if end > signal.frame_count() {
        return Err(Error::SliceOutOfBounds {
            end,
            frame_count: signal.frame_count(),
        });
    }

    let len = end - start;
    let sample_rate = signal.sample_rate();

    let gain = if options.normalize {
        let peak = signal
            .channels()
            .flat_map(|ch| ch[start..end].iter())
            .fold(0.0f32, |acc, s| acc.max(s.abs()));
        if peak > 0.0 {
            1.0 / peak
        } else {
            1.0
        }
    } else {
        1.0
    };

    let fade_in = fade_frames(options.fade_in_ms, sample_rate, len);
    let fade_out = fade_frames(options.fade_out_ms, sample_rate, len);
    let fade_out_start = len - fade_out;

    let channels = signal
        .channels()
        .map(|ch| {
            ch[start..end]
                .iter()
                .enumerate()
                .map(|(i, &s)| {
                    let mut value = s * gain;
                    if i < fade_in {
                        value *= i as f32 / fade_in as f32;
                    }
                    if i >= fade_out_start {
                        value *= (len - 1 - i) as f32 / fade_out as f32;
                    }
                    value
                })
                .collect()
        })
        .collect();

    Signal::new(sample_rate, channels)
}

fn fade_frames(ms: f32, sample_rate: u32, len: usize) -> usize {
    if !(ms.is_finite() && ms > 0.0) {
        return 0;
    }
    ((ms as f64 / 1000.0 * sample_rate as f64).round() as usize).min(len)
}
