//! Manual mode starting point.

use chopper_core::{Signal, Slice, SliceList};

/// A single slice covering the whole signal, to be shaped with
/// [`add_manual_slice`](crate::add_manual_slice) and
/// [`remove_slice`](crate::remove_slice).
///
/// A zero-length signal yields an empty list.
pub fn manual_slices(signal: &Signal) -> SliceList {
    let sample_rate = signal.sample_rate();
    let frame_count = signal.frame_count();
    if frame_count == 0 {
        return SliceList::empty(sample_rate);
    }
    SliceList::new(
        sample_rate,
        vec![Slice::new(0, frame_count, sample_rate, 1.0)],
    )
}
