//! Manual split and merge editing.
//!
//! Edits never mutate their input. A successful edit returns a list backed by
//! a new allocation; a rejected edit returns a clone sharing the input's
//! allocation, so [`SliceList::ptr_eq`] tells the two apart.

use crate::boundaries::snap_position;
use chopper_core::{AnalysisConfig, Signal, Slice, SliceId, SliceList};

/// Split the slice containing `frame_position` in two.
///
/// The position is snapped to a zero-crossing first when the config asks for
/// it. Rejected (input returned) when no slice contains the position or when
/// it lies closer than the minimum slice length to either edge of that slice.
/// The left half keeps the original ID and confidence; the right half gets a
/// new ID and confidence 1.0.
pub fn add_manual_slice(
    slices: &SliceList,
    frame_position: usize,
    signal: &Signal,
    config: &AnalysisConfig,
) -> SliceList {
    let config = config.sanitized();
    let sample_rate = slices.sample_rate();

    let position = if config.snap_to_zero_crossing {
        snap_position(signal, frame_position, config.snap_radius)
    } else {
        frame_position
    };

    let Some(index) = slices.index_at(position) else {
        tracing::trace!(position, "split rejected: outside all slices");
        return slices.clone();
    };
    let target = slices[index];

    let min_frames = config.min_frames(signal.sample_rate()).max(1);
    if position - target.start_frame < min_frames || target.end_frame - position < min_frames {
        tracing::trace!(position, min_frames, "split rejected: too close to a boundary");
        return slices.clone();
    }

    let mut updated = Vec::with_capacity(slices.len() + 1);
    updated.extend_from_slice(&slices[..index]);
    updated.push(target.with_bounds(target.start_frame, position, sample_rate));
    updated.push(Slice::new(position, target.end_frame, sample_rate, 1.0));
    updated.extend_from_slice(&slices[index + 1..]);

    SliceList::new(sample_rate, updated)
}

/// Remove a slice, merging its range into a neighbour.
///
/// The previous slice is extended over the removed range; removing the first
/// slice pulls the next slice's start back to 0. Rejected (input returned)
/// for lists of one slice or fewer and for unknown IDs.
pub fn remove_slice(slices: &SliceList, id: SliceId) -> SliceList {
    if slices.len() <= 1 {
        return slices.clone();
    }
    let Some(index) = slices.index_of(id) else {
        tracing::trace!(?id, "remove rejected: unknown slice");
        return slices.clone();
    };

    let sample_rate = slices.sample_rate();
    let removed = slices[index];
    let mut updated = slices.to_vec();
    updated.remove(index);

    if index > 0 {
        let prev = &mut updated[index - 1];
        *prev = prev.with_bounds(prev.start_frame, removed.end_frame, sample_rate);
    } else {
        let next = &mut updated[0];
        *next = next.with_bounds(0, next.end_frame, sample_rate);
    }

    SliceList::new(sample_rate, updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manual::manual_slices;
    use proptest::prelude::*;

    const SR: u32 = 1000;

    fn signal(frames: usize) -> Signal {
        Signal::silence(SR, 1, frames).unwrap()
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig::default()
            .with_min_slice_ms(10.0)
            .with_snap_to_zero_crossing(false)
    }

    #[test]
    fn test_split() {
        let signal = signal(1000);
        let slices = manual_slices(&signal);
        let split = add_manual_slice(&slices, 400, &signal, &config());

        assert!(!split.ptr_eq(&slices));
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].id, slices[0].id);
        assert_eq!((split[0].start_frame, split[0].end_frame), (0, 400));
        assert_eq!((split[1].start_frame, split[1].end_frame), (400, 1000));
        assert_ne!(split[1].id, slices[0].id);
        assert!(split.check_invariants(1000).is_ok());
        // Input untouched
        assert_eq!(slices.len(), 1);
    }

    #[test]
    fn test_split_too_close_is_noop() {
        let signal = signal(1000);
        let slices = manual_slices(&signal);
        for position in [0, 5, 995, 999] {
            let result = add_manual_slice(&slices, position, &signal, &config());
            assert!(result.ptr_eq(&slices), "position {position}");
        }
        // Exactly the minimum length away is allowed
        assert_eq!(add_manual_slice(&slices, 10, &signal, &config()).len(), 2);
    }

    #[test]
    fn test_split_outside_is_noop() {
        let signal = signal(1000);
        let slices = manual_slices(&signal);
        assert!(add_manual_slice(&slices, 1000, &signal, &config()).ptr_eq(&slices));
        assert!(add_manual_slice(&slices, 5000, &signal, &config()).ptr_eq(&slices));
    }

    #[test]
    fn test_split_snaps() {
        let samples: Vec<f32> = (0..1000).map(|i| if i <= 420 { 0.5 } else { -0.5 }).collect();
        let signal = Signal::mono(SR, samples).unwrap();
        let slices = manual_slices(&signal);
        let config = config().with_snap_to_zero_crossing(true).with_snap_radius(64);
        let split = add_manual_slice(&slices, 400, &signal, &config);
        assert_eq!(split[1].start_frame, 420);
    }

    #[test]
    fn test_remove_merges_into_previous() {
        let signal = signal(1000);
        let mut slices = manual_slices(&signal);
        for position in [250, 500, 750] {
            slices = add_manual_slice(&slices, position, &signal, &config());
        }
        let removed = remove_slice(&slices, slices[2].id);
        assert_eq!(removed.len(), 3);
        assert_eq!((removed[1].start_frame, removed[1].end_frame), (250, 750));
        assert_eq!(removed[1].id, slices[1].id);
        assert!(removed.check_invariants(1000).is_ok());
    }

    #[test]
    fn test_remove_first_pulls_next_to_zero() {
        let signal = signal(1000);
        let slices = add_manual_slice(&manual_slices(&signal), 300, &signal, &config());
        let removed = remove_slice(&slices, slices[0].id);
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, slices[1].id);
        assert_eq!((removed[0].start_frame, removed[0].end_frame), (0, 1000));
        assert_eq!(removed[0].start_time, 0.0);
    }

    #[test]
    fn test_remove_rejections() {
        let signal = signal(1000);
        let single = manual_slices(&signal);
        assert!(remove_slice(&single, single[0].id).ptr_eq(&single));

        let pair = add_manual_slice(&single, 500, &signal, &config());
        assert!(remove_slice(&pair, SliceId(u64::MAX)).ptr_eq(&pair));
    }

    #[test]
    fn test_split_then_remove_restores_coverage() {
        let signal = signal(1000);
        let slices = manual_slices(&signal);
        let split = add_manual_slice(&slices, 640, &signal, &config());
        let restored = remove_slice(&split, split[1].id);
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].start_frame, slices[0].start_frame);
        assert_eq!(restored[0].end_frame, slices[0].end_frame);
        assert_eq!(restored[0].id, slices[0].id);
    }

    proptest! {
        #[test]
        fn prop_split_keeps_ids_unique_and_min_length(
            positions in proptest::collection::vec(0usize..2000, 1..20),
        ) {
            let signal = signal(2000);
            let config = config();
            let min_frames = config.min_frames(SR);
            let mut slices = manual_slices(&signal);

            for position in positions {
                let before = slices.clone();
                slices = add_manual_slice(&slices, position, &signal, &config);
                prop_assert!(slices.check_invariants(2000).is_ok());

                if slices.ptr_eq(&before) {
                    continue;
                }
                prop_assert_eq!(slices.len(), before.len() + 1);
                prop_assert!(slices.iter().any(|s| s.start_frame == position));
                for slice in slices.iter() {
                    prop_assert!(slice.len_frames() >= min_frames);
                }
                let mut ids: Vec<SliceId> = slices.iter().map(|s| s.id).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), slices.len());
            }
        }
    }
}
