//! Test helpers and fixtures for chopper integration tests
//!
//! Signals are generated deterministically so onset positions are known up
//! front. Use the constants in [`tolerances`] for float comparisons.

#![allow(dead_code)]

pub mod tolerances;

use chopper::prelude::*;

/// Default test sample rate
pub const TEST_SAMPLE_RATE: u32 = 44100;

/// Install a test-writer tracing subscriber (once per test binary).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Engine with default framing and sequential flux, so results do not depend
/// on the thread pool.
pub fn test_engine() -> SliceEngine {
    SliceEngine::builder()
        .parallel(false)
        .build()
        .expect("Failed to create test engine")
}

/// Generate a sine wave at the given frequency.
pub fn generate_sine(frequency: f64, sample_rate: u32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate as f64;
            (2.0 * std::f64::consts::PI * frequency * t).sin() as f32
        })
        .collect()
}

/// Generate white noise in -1..1 from a seeded LCG.
pub fn generate_noise(num_samples: usize, seed: u64) -> Vec<f32> {
    let mut rng = seed;
    (0..num_samples)
        .map(|_| {
            rng = rng.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((rng >> 33) as f32 / (1u64 << 31) as f32) * 2.0 - 1.0
        })
        .collect()
}

/// Fast-decaying noise bursts ("drum hits") starting at each time in seconds.
pub fn generate_hits(sample_rate: u32, duration_secs: f64, times: &[f64]) -> Vec<f32> {
    let len = (sample_rate as f64 * duration_secs) as usize;
    let mut samples = vec![0.0f32; len];
    for (n, &t) in times.iter().enumerate() {
        let pos = (t * sample_rate as f64) as usize;
        let burst = generate_noise(4000, 0x5eed + n as u64);
        for (i, noise) in burst.iter().enumerate() {
            let Some(sample) = samples.get_mut(pos + i) else {
                break;
            };
            *sample += noise * (-(i as f32) / 600.0).exp() * 0.9;
        }
    }
    samples
}

/// Mono signal of evenly spaced hits, one every `interval_secs`, starting at
/// `interval_secs / 2`.
pub fn hit_loop(interval_secs: f64, count: usize) -> Signal {
    let times: Vec<f64> = (0..count)
        .map(|i| interval_secs / 2.0 + i as f64 * interval_secs)
        .collect();
    let duration = interval_secs * count as f64;
    Signal::mono(
        TEST_SAMPLE_RATE,
        generate_hits(TEST_SAMPLE_RATE, duration, &times),
    )
    .expect("valid signal")
}

/// Calculate peak amplitude of a buffer.
pub fn peak(samples: &[f32]) -> f32 {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, |a, b| a.max(b))
}

/// Assert a list covers `0..frame_count` in order with no gaps or overlaps.
pub fn assert_covers(slices: &SliceList, frame_count: usize) {
    if let Err(err) = slices.check_invariants(frame_count) {
        panic!("slice list invalid ({err}): {:?}", slices.as_slice());
    }
}

/// `(start, end)` of every slice, ignoring IDs (which differ between runs).
pub fn bounds(slices: &SliceList) -> Vec<(usize, usize)> {
    slices.iter().map(|s| (s.start_frame, s.end_frame)).collect()
}
