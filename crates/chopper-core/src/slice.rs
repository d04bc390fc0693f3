//! Slice records and the ordered slice list.

use crate::{Error, Result};
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SLICE_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a slice.
///
/// IDs come from a process-wide counter. Deserializing an ID advances the
/// counter past it, so slices created after restoring a saved list never
/// reuse a restored ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub struct SliceId(pub u64);

impl SliceId {
    /// Generate a new unique slice ID.
    pub fn generate() -> Self {
        Self(NEXT_SLICE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Make sure [`generate`](Self::generate) never returns `id` again.
    #[cfg(feature = "serialization")]
    fn reserve(id: u64) {
        NEXT_SLICE_ID.fetch_max(id.saturating_add(1), Ordering::Relaxed);
    }
}

#[cfg(feature = "serialization")]
impl<'de> serde::Deserialize<'de> for SliceId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = u64::deserialize(deserializer)?;
        Self::reserve(raw);
        Ok(Self(raw))
    }
}

/// A contiguous region `[start_frame, end_frame)` of a signal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Slice {
    pub id: SliceId,
    /// First frame of the slice
    pub start_frame: usize,
    /// One past the last frame of the slice
    pub end_frame: usize,
    /// `start_frame` in seconds
    pub start_time: f64,
    /// `end_frame` in seconds
    pub end_time: f64,
    /// Detection confidence (0.0 - 1.0). Always 1.0 for grid and manual slices.
    pub confidence: f32,
}

impl Slice {
    /// Create a slice with a freshly generated ID.
    pub fn new(start_frame: usize, end_frame: usize, sample_rate: u32, confidence: f32) -> Self {
        Self::with_id(
            SliceId::generate(),
            start_frame,
            end_frame,
            sample_rate,
            confidence,
        )
    }

    /// Create a slice with an explicit ID.
    pub fn with_id(
        id: SliceId,
        start_frame: usize,
        end_frame: usize,
        sample_rate: u32,
        confidence: f32,
    ) -> Self {
        let sr = sample_rate.max(1) as f64;
        Self {
            id,
            start_frame,
            end_frame,
            start_time: start_frame as f64 / sr,
            end_time: end_frame as f64 / sr,
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Copy of this slice with new bounds, keeping ID and confidence.
    pub fn with_bounds(&self, start_frame: usize, end_frame: usize, sample_rate: u32) -> Self {
        Self::with_id(
            self.id,
            start_frame,
            end_frame,
            sample_rate,
            self.confidence,
        )
    }

    /// Length in frames
    #[inline]
    pub fn len_frames(&self) -> usize {
        self.end_frame.saturating_sub(self.start_frame)
    }

    /// Length in milliseconds
    pub fn duration_ms(&self, sample_rate: u32) -> f64 {
        self.len_frames() as f64 * 1000.0 / sample_rate.max(1) as f64
    }

    /// Whether `frame` lies inside `[start_frame, end_frame)`
    #[inline]
    pub fn contains(&self, frame: usize) -> bool {
        frame >= self.start_frame && frame < self.end_frame
    }
}

/// Ordered, contiguous list of slices covering a signal.
///
/// Slices are shared behind an `Arc`, so cloning is cheap. Edits never mutate
/// a list in place: a successful edit returns a list backed by a new
/// allocation, a rejected edit returns a clone of the input. Use
/// [`SliceList::ptr_eq`] to tell the two apart.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SliceList {
    sample_rate: u32,
    slices: Arc<[Slice]>,
}

impl SliceList {
    /// Wrap already-ordered slices.
    pub fn new(sample_rate: u32, slices: Vec<Slice>) -> Self {
        Self {
            sample_rate,
            slices: slices.into(),
        }
    }

    /// An empty list (only produced for zero-length signals)
    pub fn empty(sample_rate: u32) -> Self {
        Self::new(sample_rate, Vec::new())
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn as_slice(&self) -> &[Slice] {
        &self.slices
    }

    /// Copy the slices into a new vector
    pub fn to_vec(&self) -> Vec<Slice> {
        self.slices.to_vec()
    }

    /// Whether both lists share the same allocation.
    ///
    /// True after a rejected edit, false after a successful one.
    pub fn ptr_eq(&self, other: &SliceList) -> bool {
        Arc::ptr_eq(&self.slices, &other.slices)
    }

    /// End frame of the last slice (0 for an empty list)
    pub fn frame_count(&self) -> usize {
        self.slices.last().map_or(0, |s| s.end_frame)
    }

    /// Index of the slice containing `frame`.
    pub fn index_at(&self, frame: usize) -> Option<usize> {
        let idx = self.slices.partition_point(|s| s.end_frame <= frame);
        (idx < self.slices.len() && self.slices[idx].contains(frame)).then_some(idx)
    }

    /// The slice containing `frame`.
    pub fn slice_at(&self, frame: usize) -> Option<&Slice> {
        self.index_at(frame).map(|i| &self.slices[i])
    }

    /// Position of the slice with the given ID.
    pub fn index_of(&self, id: SliceId) -> Option<usize> {
        self.slices.iter().position(|s| s.id == id)
    }

    /// Verify ordering, contiguity and full coverage of `frame_count` frames.
    pub fn check_invariants(&self, frame_count: usize) -> Result<()> {
        if self.slices.is_empty() {
            return if frame_count == 0 {
                Ok(())
            } else {
                Err(Error::SliceOutOfBounds {
                    end: 0,
                    frame_count,
                })
            };
        }

        for slice in self.slices.iter() {
            if slice.start_frame >= slice.end_frame {
                return Err(Error::InvalidSlice {
                    start: slice.start_frame,
                    end: slice.end_frame,
                });
            }
        }
        if self.slices[0].start_frame != 0 {
            return Err(Error::InvalidSlice {
                start: self.slices[0].start_frame,
                end: self.slices[0].end_frame,
            });
        }
        if let Some(pair) = self
            .slices
            .windows(2)
            .find(|pair| pair[0].end_frame != pair[1].start_frame)
        {
            return Err(Error::InvalidSlice {
                start: pair[0].end_frame,
                end: pair[1].start_frame,
            });
        }
        let end = self.frame_count();
        if end != frame_count {
            return Err(Error::SliceOutOfBounds { end, frame_count });
        }
        Ok(())
    }
}

impl Deref for SliceList {
    type Target = [Slice];

    fn deref(&self) -> &[Slice] {
        &self.slices
    }
}

impl PartialEq for SliceList {
    fn eq(&self, other: &Self) -> bool {
        self.sample_rate == other.sample_rate && self.slices[..] == other.slices[..]
    }
}

impl<'a> IntoIterator for &'a SliceList {
    type Item = &'a Slice;
    type IntoIter = std::slice::Iter<'a, Slice>;

    fn into_iter(self) -> Self::IntoIter {
        self.slices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn list(bounds: &[usize]) -> SliceList {
        let slices = bounds
            .windows(2)
            .map(|w| Slice::new(w[0], w[1], 1000, 1.0))
            .collect();
        SliceList::new(1000, slices)
    }

    #[test]
    fn test_ids_are_unique() {
        let a = SliceId::generate();
        let b = SliceId::generate();
        assert_ne!(a, b);
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_restored_ids_are_not_reissued() {
        let restored: SliceId = serde_json::from_str("5000000").unwrap();
        assert_eq!(restored, SliceId(5_000_000));
        assert!(SliceId::generate().0 > 5_000_000);

        let json = serde_json::to_string(&restored).unwrap();
        assert_eq!(json, "5000000");
    }

    #[test]
    fn test_slice_times_derive_from_frames() {
        let slice = Slice::new(22050, 44100, 44100, 1.5);
        assert_relative_eq!(slice.start_time, 0.5);
        assert_relative_eq!(slice.end_time, 1.0);
        assert_eq!(slice.confidence, 1.0);
        assert_relative_eq!(slice.duration_ms(44100), 500.0);
    }

    #[test]
    fn test_slice_at() {
        let slices = list(&[0, 10, 25, 40]);
        assert_eq!(slices.index_at(0), Some(0));
        assert_eq!(slices.index_at(9), Some(0));
        assert_eq!(slices.index_at(10), Some(1));
        assert_eq!(slices.index_at(39), Some(2));
        assert_eq!(slices.index_at(40), None);
    }

    #[test]
    fn test_check_invariants() {
        assert!(list(&[0, 10, 25, 40]).check_invariants(40).is_ok());
        assert!(list(&[0, 10, 25, 40]).check_invariants(41).is_err());
        assert!(SliceList::empty(1000).check_invariants(0).is_ok());
        assert_eq!(
            SliceList::empty(1000).check_invariants(500),
            Err(Error::SliceOutOfBounds {
                end: 0,
                frame_count: 500
            })
        );

        let gap = SliceList::new(
            1000,
            vec![Slice::new(0, 10, 1000, 1.0), Slice::new(12, 20, 1000, 1.0)],
        );
        assert_eq!(
            gap.check_invariants(20),
            Err(Error::InvalidSlice { start: 10, end: 12 })
        );
    }

    #[test]
    fn test_clone_shares_allocation() {
        let a = list(&[0, 10, 20]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));

        let c = SliceList::new(a.sample_rate(), a.to_vec());
        assert!(!a.ptr_eq(&c));
        assert_eq!(a, c);
    }
}
