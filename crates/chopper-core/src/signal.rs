//! Decoded audio held as one sample vector per channel.

use crate::{Error, Result};

/// Provider of decoded audio.
///
/// Implemented by whatever host layer decodes files or captures audio. The
/// slicing engine only needs the sample rate and per-channel sample slices.
pub trait SignalSource {
    /// Sample rate in Hz
    fn sample_rate(&self) -> u32;

    /// Number of channels
    fn num_channels(&self) -> usize;

    /// Number of frames (samples per channel)
    fn frame_count(&self) -> usize;

    /// Samples of one channel, `frame_count()` long
    fn channel_data(&self, channel: usize) -> &[f32];
}

/// Multi-channel audio buffer with a fixed sample rate.
///
/// All channels are guaranteed to hold the same number of frames.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Signal {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl Signal {
    /// Create a signal from per-channel sample vectors.
    ///
    /// Fails if the sample rate is zero or the channels differ in length.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::InvalidSampleRate(sample_rate));
        }
        if let Some(first) = channels.first() {
            let expected = first.len();
            if let Some((channel, ch)) = channels
                .iter()
                .enumerate()
                .find(|(_, ch)| ch.len() != expected)
            {
                return Err(Error::ChannelLengthMismatch {
                    channel,
                    expected,
                    actual: ch.len(),
                });
            }
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Create a single-channel signal.
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Result<Self> {
        Self::new(sample_rate, vec![samples])
    }

    /// Create a signal of `frame_count` zero samples on each channel.
    pub fn silence(sample_rate: u32, num_channels: usize, frame_count: usize) -> Result<Self> {
        Self::new(sample_rate, vec![vec![0.0; frame_count]; num_channels])
    }

    /// Create from interleaved samples (`[L0, R0, L1, R1, ...]`).
    ///
    /// A trailing partial frame is dropped.
    pub fn from_interleaved(sample_rate: u32, num_channels: usize, data: &[f32]) -> Result<Self> {
        let num_channels = num_channels.max(1);
        let frames = data.len() / num_channels;
        let channels = (0..num_channels)
            .map(|ch| {
                data.iter()
                    .skip(ch)
                    .step_by(num_channels)
                    .take(frames)
                    .copied()
                    .collect()
            })
            .collect();
        Self::new(sample_rate, channels)
    }

    /// Copy the audio of any [`SignalSource`] into an owned signal.
    pub fn from_source<S: SignalSource + ?Sized>(source: &S) -> Result<Self> {
        let frames = source.frame_count();
        let channels = (0..source.num_channels())
            .map(|ch| {
                let data = source.channel_data(ch);
                data[..frames.min(data.len())].to_vec()
            })
            .collect();
        Self::new(source.sample_rate(), channels)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Samples of one channel.
    ///
    /// # Panics
    /// Panics if `channel >= num_channels()`.
    pub fn channel(&self, channel: usize) -> &[f32] {
        &self.channels[channel]
    }

    /// Iterate over all channels
    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    /// Consume the signal, returning the channel vectors.
    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Convert a frame index to seconds
    #[inline]
    pub fn frame_to_secs(&self, frame: usize) -> f64 {
        frame as f64 / self.sample_rate as f64
    }
}

impl SignalSource for Signal {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn num_channels(&self) -> usize {
        self.channels.len()
    }

    fn frame_count(&self) -> usize {
        Signal::frame_count(self)
    }

    fn channel_data(&self, channel: usize) -> &[f32] {
        &self.channels[channel]
    }
}
