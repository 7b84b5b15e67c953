//! Single job processing pipeline.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::clipper::ClipExtractor;
use crate::constants::ANALYSIS_SAMPLE_RATE;
use crate::error::{Error, Result};
use crate::jobs::{ReconcileOutcome, Reconciler, SourceJob, label_span};
use crate::transcode;
use crate::vad::{SileroVad, merge_segments};

/// Result of processing a single job.
#[derive(Debug)]
pub struct JobResult {
    /// Clips written for this job.
    pub clips_written: usize,
    /// Merged segments the detector reported.
    pub detected_segments: usize,
}

/// Run one source recording through the full pipeline: transcode, detect,
/// merge, reconcile, extract.
///
/// The intermediate analysis WAV lives in a per-job scratch directory and
/// is released when this function returns, on success and failure alike.
#[allow(clippy::cast_precision_loss)]
pub fn process_job(
    job: &SourceJob,
    detector: &mut SileroVad,
    reconciler: &mut Reconciler,
    extractor: &ClipExtractor,
    merge_gap_samples: usize,
) -> Result<JobResult> {
    info!("Processing: {}", job.file_name());

    let scratch = tempfile::tempdir().map_err(|e| Error::ScratchDirCreateFailed { source: e })?;
    let stem = job
        .path
        .file_stem()
        .map_or_else(|| "source".to_owned(), |s| s.to_string_lossy().into_owned());
    let analysis_wav = scratch.path().join(format!("{stem}_16k.wav"));

    transcode::to_analysis_wav(&job.path, &analysis_wav)?;
    let samples = read_analysis_wav(&analysis_wav)?;
    debug!(
        "Analysis waveform: {} samples ({:.1}s)",
        samples.len(),
        samples.len() as f64 / f64::from(ANALYSIS_SAMPLE_RATE)
    );

    let raw = detector.detect(&samples)?;
    let merged = merge_segments(&raw, merge_gap_samples);
    debug!(
        "Detected {} raw segment(s), {} after gap bridging",
        raw.len(),
        merged.len()
    );

    let reconciliation = reconciler.reconcile(job, &merged, ANALYSIS_SAMPLE_RATE);
    match reconciliation.outcome {
        ReconcileOutcome::Skipped => {
            warn!("{}: no speech segments detected, skipping", job.file_name());
            return Ok(JobResult {
                clips_written: 0,
                detected_segments: merged.len(),
            });
        }
        ReconcileOutcome::Truncated { detected, expected } => {
            warn!(
                "{}: detected {detected} segment(s) but expected {expected}, \
                 keeping the first {}",
                job.file_name(),
                reconciliation.clips.len()
            );
        }
        ReconcileOutcome::Exact => {}
    }

    for clip in &reconciliation.clips {
        extractor.extract(&analysis_wav, clip)?;
    }

    if let Some((first, last)) = label_span(&reconciliation.clips) {
        info!(
            "{}: wrote {} clip(s), labels {first}-{last}",
            job.file_name(),
            reconciliation.clips.len()
        );
    }

    Ok(JobResult {
        clips_written: reconciliation.clips.len(),
        detected_segments: merged.len(),
    })
}

/// Read the ffmpeg-produced analysis WAV into mono f32 samples.
///
/// The transcode step pins the format (16-bit PCM, mono, analysis rate);
/// anything else here means the collaborator contract was broken.
fn read_analysis_wav(path: &Path) -> Result<Vec<f32>> {
    let mut reader = hound::WavReader::open(path).map_err(|e| Error::AnalysisWavRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let spec = reader.spec();
    if spec.channels != 1 || spec.sample_rate != ANALYSIS_SAMPLE_RATE {
        return Err(Error::AnalysisWavFormat {
            path: path.to_path_buf(),
            detail: format!(
                "expected mono at {ANALYSIS_SAMPLE_RATE} Hz, got {} channel(s) at {} Hz",
                spec.channels, spec.sample_rate
            ),
        });
    }
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(Error::AnalysisWavFormat {
            path: path.to_path_buf(),
            detail: format!(
                "expected 16-bit PCM, got {}-bit {:?}",
                spec.bits_per_sample, spec.sample_format
            ),
        });
    }

    reader
        .samples::<i16>()
        .map(|sample| {
            sample
                .map(|v| f32::from(v) / f32::from(i16::MAX))
                .map_err(|e| Error::AnalysisWavRead {
                    path: path.to_path_buf(),
                    source: e,
                })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, spec: hound::WavSpec, samples: &[i16]) {
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn reads_conforming_wav_as_f32() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: ANALYSIS_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav(&path, spec, &[0, i16::MAX, i16::MIN + 1]);

        let samples = read_analysis_wav(&path).unwrap();
        assert_eq!(samples.len(), 3);
        assert!((samples[0] - 0.0).abs() < f32::EPSILON);
        assert!((samples[1] - 1.0).abs() < f32::EPSILON);
        assert!((samples[2] + 1.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_wrong_sample_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrong_rate.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav(&path, spec, &[0; 10]);

        let result = read_analysis_wav(&path);
        assert!(matches!(result, Err(Error::AnalysisWavFormat { .. })));
    }

    #[test]
    fn rejects_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: ANALYSIS_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav(&path, spec, &[0; 20]);

        let result = read_analysis_wav(&path);
        assert!(matches!(result, Err(Error::AnalysisWavFormat { .. })));
    }

    #[test]
    fn missing_wav_is_a_read_error() {
        let result = read_analysis_wav(Path::new("/nonexistent/analysis.wav"));
        assert!(matches!(result, Err(Error::AnalysisWavRead { .. })));
    }
}
