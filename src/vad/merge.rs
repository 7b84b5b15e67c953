//! Gap bridging between detected segments.
//!
//! The detector splits one spoken number into multiple intervals when the
//! speaker pauses mid-word. Bridging short gaps restores one interval per
//! number so segment counts line up with the declared ranges.

use super::SpeechSegment;

/// Collapse start-ordered segments separated by gaps of at most
/// `max_gap_samples` into single spanning segments.
///
/// A single left-to-right sweep suffices because the detector emits segments
/// pre-sorted by start. Merging is transitive: a chain of segments each
/// within the gap of its neighbor collapses into one.
#[must_use]
pub fn merge_segments(segments: &[SpeechSegment], max_gap_samples: usize) -> Vec<SpeechSegment> {
    let mut merged: Vec<SpeechSegment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match merged.last_mut() {
            Some(last) if segment.start.saturating_sub(last.end) <= max_gap_samples => {
                last.end = last.end.max(segment.end);
            }
            _ => merged.push(*segment),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: usize, end: usize) -> SpeechSegment {
        SpeechSegment { start, end }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(merge_segments(&[], 2400).is_empty());
    }

    #[test]
    fn bridges_gap_at_or_below_threshold() {
        let input = [seg(0, 1000), seg(3400, 5000)];
        assert_eq!(merge_segments(&input, 2400), vec![seg(0, 5000)]);
    }

    #[test]
    fn keeps_gap_above_threshold() {
        let input = [seg(0, 1000), seg(3401, 5000)];
        assert_eq!(merge_segments(&input, 2400), vec![seg(0, 1000), seg(3401, 5000)]);
    }

    #[test]
    fn merging_is_transitive_across_chains() {
        let input = [seg(0, 100), seg(200, 300), seg(400, 500), seg(5000, 6000)];
        assert_eq!(
            merge_segments(&input, 150),
            vec![seg(0, 500), seg(5000, 6000)]
        );
    }

    #[test]
    fn overlapping_segments_collapse() {
        let input = [seg(0, 1000), seg(500, 800), seg(900, 2000)];
        assert_eq!(merge_segments(&input, 0), vec![seg(0, 2000)]);
    }

    #[test]
    fn merge_is_idempotent() {
        let input = [seg(0, 100), seg(150, 300), seg(5000, 5600)];
        let once = merge_segments(&input, 200);
        let twice = merge_segments(&once, 200);
        assert_eq!(once, twice);
    }

    #[test]
    fn output_starts_come_from_input_starts() {
        let input = [seg(10, 100), seg(120, 300), seg(900, 1000)];
        let merged = merge_segments(&input, 50);
        for m in &merged {
            assert!(input.iter().any(|s| s.start == m.start));
        }
    }

    #[test]
    fn no_sub_threshold_gaps_remain() {
        let input = [seg(0, 100), seg(130, 200), seg(260, 400), seg(800, 900)];
        let merged = merge_segments(&input, 60);
        for pair in merged.windows(2) {
            assert!(pair[1].start - pair[0].end > 60);
        }
    }
}
