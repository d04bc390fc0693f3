//! Channel downmix for analysis.

use chopper_core::Signal;

/// Average all channels into one.
///
/// Analysis runs on the mono mix; extraction still uses every channel.
pub fn downmix(signal: &Signal) -> Vec<f32> {
    match signal.num_channels() {
        0 => Vec::new(),
        1 => signal.channel(0).to_vec(),
        n => {
            let mut mono = vec![0.0f32; signal.frame_count()];
            for channel in signal.channels() {
                for (acc, &s) in mono.iter_mut().zip(channel) {
                    *acc += s;
                }
            }
            let scale = 1.0 / n as f32;
            mono.iter_mut().for_each(|s| *s *= scale);
            mono
        }
    }
}
