//! Voice activity detection and segment merging.

mod detector;
mod merge;

pub use detector::{SileroVad, VadConfig, segments_from_probs};
pub use merge::merge_segments;

/// A speech interval in sample offsets at the analysis sample rate.
///
/// Invariant: `start < end`. Sequences produced by the detector and the
/// merger are ordered by ascending `start` and non-overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechSegment {
    /// First sample of the interval.
    pub start: usize,
    /// One past the last sample of the interval.
    pub end: usize,
}

impl SpeechSegment {
    /// Interval length in samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True if the interval is degenerate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
