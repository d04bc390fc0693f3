//! Tolerance constants for slicing tests.

/// Floating point rounding errors (gain, fades).
pub const FLOAT_EPSILON: f32 = 1e-6;

/// Spectral tolerance when comparing against a reference FFT.
pub const DSP_EPSILON: f32 = 1e-3;

/// How far a detected onset may sit from where the hit was placed, in
/// samples. Five hops covers frame quantization plus window smearing.
pub const ONSET_TOLERANCE_FRAMES: usize = 5 * 512;

/// Maximum distance zero-crossing snapping may move a boundary (default radius).
pub const SNAP_TOLERANCE_FRAMES: usize = 256;
