//! Expected-count reconciliation and sequential labeling.
//!
//! The detector is noisy: a recording declared as `0-19` may yield 19 or 21
//! merged segments. The reconciler tolerates that without corrupting the
//! numbering of later jobs: it truncates to the smaller of declared and
//! detected counts, and only advances the shared counter for jobs that
//! declared nothing.

use std::path::PathBuf;

use crate::jobs::range::{NumberRange, parse_range_from_stem};
use crate::vad::SpeechSegment;

/// One source recording and its declared numeric content.
#[derive(Debug, Clone)]
pub struct SourceJob {
    /// Location of the source audio.
    pub path: PathBuf,
    /// Range claim parsed from the filename, if any.
    pub range: NumberRange,
}

impl SourceJob {
    /// Build a job from a source path, parsing the range from the file stem.
    #[must_use]
    pub fn from_path(path: PathBuf) -> Self {
        let range = path
            .file_stem()
            .map_or(NumberRange::Undeclared, |stem| {
                parse_range_from_stem(&stem.to_string_lossy())
            });
        Self { path, range }
    }

    /// File name for log messages and ordering ties.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}

/// One accepted, labeled speech segment ready for extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledClip {
    /// The spoken number this clip contains.
    pub label: u32,
    /// Clip start in seconds within the job's analysis waveform.
    pub start_secs: f64,
    /// Clip end in seconds within the job's analysis waveform.
    pub end_secs: f64,
}

/// How a job's detection result compared against its expected count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Detected count matched the expected count exactly.
    Exact,
    /// Nothing expected or nothing detected; the job produced no clips.
    Skipped,
    /// Counts disagreed; output was truncated to the smaller count.
    Truncated {
        /// Merged segments the detector reported.
        detected: usize,
        /// Segments the filename range (or detection itself) implied.
        expected: usize,
    },
}

/// Result of reconciling one job.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Accepted clips in time order, labels assigned.
    pub clips: Vec<LabeledClip>,
    /// Outcome classification, for warning emission by the caller.
    pub outcome: ReconcileOutcome,
}

/// Assigns labels across a run, tracking the next number for jobs that
/// declared no range.
///
/// Processing order matters: declared-range jobs must be reconciled before
/// undeclared ones so the counter's initial value (one past the highest
/// declared range) is stable by the time an undeclared job reads it. Use
/// [`order_jobs`] on the job list first.
#[derive(Debug)]
pub struct Reconciler {
    next_label: u32,
}

impl Reconciler {
    /// Initialize the label counter from the declared ranges of all jobs:
    /// one past the maximum declared `high`, or 0 if no job declares a range.
    #[must_use]
    pub fn new(jobs: &[SourceJob]) -> Self {
        let next_label = jobs
            .iter()
            .filter_map(|job| match job.range {
                NumberRange::Declared { high, .. } => Some(high + 1),
                NumberRange::Undeclared => None,
            })
            .max()
            .unwrap_or(0);
        Self { next_label }
    }

    /// Next label an undeclared job would receive.
    #[must_use]
    pub fn next_label(&self) -> u32 {
        self.next_label
    }

    /// Reconcile one job's merged segments against its expected count and
    /// assign labels.
    ///
    /// Zero expected or zero detected segments skips the job without
    /// touching the counter. On a count mismatch the first
    /// `min(detected, expected)` segments are labeled in time order; extra
    /// detections and undetected declared labels are dropped. The counter
    /// advances by the accepted count, for undeclared jobs only.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn reconcile(
        &mut self,
        job: &SourceJob,
        merged: &[SpeechSegment],
        sample_rate: u32,
    ) -> Reconciliation {
        let (label_start, expected) = match job.range {
            NumberRange::Declared { low, high } => (low, (high - low + 1) as usize),
            NumberRange::Undeclared => (self.next_label, merged.len()),
        };

        if expected == 0 || merged.is_empty() {
            return Reconciliation {
                clips: Vec::new(),
                outcome: ReconcileOutcome::Skipped,
            };
        }

        let accepted = merged.len().min(expected);
        let clips = merged[..accepted]
            .iter()
            .enumerate()
            .map(|(i, segment)| LabeledClip {
                label: label_start + i as u32,
                start_secs: segment.start as f64 / f64::from(sample_rate),
                end_secs: segment.end as f64 / f64::from(sample_rate),
            })
            .collect();

        if !job.range.is_declared() {
            self.next_label = label_start + accepted as u32;
        }

        let outcome = if merged.len() == expected {
            ReconcileOutcome::Exact
        } else {
            ReconcileOutcome::Truncated {
                detected: merged.len(),
                expected,
            }
        };

        Reconciliation { clips, outcome }
    }
}

/// Order jobs for reconciliation: declared ranges first by ascending `low`
/// (ties broken by file name), undeclared jobs after in discovery order.
pub fn order_jobs(jobs: &mut [SourceJob]) {
    jobs.sort_by(|a, b| match (a.range, b.range) {
        (
            NumberRange::Declared { low: la, .. },
            NumberRange::Declared { low: lb, .. },
        ) => la.cmp(&lb).then_with(|| a.file_name().cmp(&b.file_name())),
        (NumberRange::Declared { .. }, NumberRange::Undeclared) => std::cmp::Ordering::Less,
        (NumberRange::Undeclared, NumberRange::Declared { .. }) => std::cmp::Ordering::Greater,
        // Stable sort keeps discovery order between undeclared jobs.
        (NumberRange::Undeclared, NumberRange::Undeclared) => std::cmp::Ordering::Equal,
    });
}

/// First and last label of an accepted clip list, for summary logging.
pub(crate) fn label_span(clips: &[LabeledClip]) -> Option<(u32, u32)> {
    Some((clips.first()?.label, clips.last()?.label))
}
