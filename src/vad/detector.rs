//! Silero VAD inference via ONNX Runtime.
//!
//! The model contract: inputs `input [1, N] f32`, `state [2, 1, 128] f32`
//! and `sr i64`; outputs a speech probability `[1, 1]` and the recurrent
//! state `stateN`. Audio is fed in 512-sample frames at 16 kHz and the
//! per-frame probabilities are reduced to sample-domain intervals by a
//! trigger/hangover state machine.

use std::path::Path;

use ort::session::{Session, SessionInputValue};
use ort::value::Tensor;
use tracing::debug;

use super::SpeechSegment;
use crate::constants::{ANALYSIS_SAMPLE_RATE, vad};
use crate::error::{Error, Result};

/// Detector configuration, mirroring the Silero utility knobs.
#[derive(Debug, Clone, Copy)]
pub struct VadConfig {
    /// Speech probability threshold for entering a segment.
    pub threshold: f32,
    /// Minimum speech duration in milliseconds.
    pub min_speech_ms: u32,
    /// Minimum silence duration in milliseconds before a segment closes.
    pub min_silence_ms: u32,
    /// Padding added to both segment edges, in milliseconds.
    pub speech_pad_ms: u32,
    /// Sample rate of the analysis waveform in Hz.
    pub sample_rate: u32,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            threshold: vad::DEFAULT_THRESHOLD,
            min_speech_ms: vad::DEFAULT_MIN_SPEECH_MS,
            min_silence_ms: vad::DEFAULT_MIN_SILENCE_MS,
            speech_pad_ms: vad::DEFAULT_SPEECH_PAD_MS,
            sample_rate: ANALYSIS_SAMPLE_RATE,
        }
    }
}

impl VadConfig {
    fn samples_for_ms(&self, ms: u32) -> usize {
        (self.sample_rate as usize * ms as usize) / 1000
    }

    /// Exit threshold: entering silence requires dropping below this.
    fn neg_threshold(&self) -> f32 {
        self.threshold - vad::NEG_THRESHOLD_MARGIN
    }
}

/// Silero VAD session with its recurrent-state bookkeeping.
pub struct SileroVad {
    session: Session,
    config: VadConfig,
    prob_output: usize,
    state_output: usize,
}

impl SileroVad {
    /// Load the ONNX model from disk and verify it has the Silero VAD
    /// signature (a `stateN` output alongside the probability output).
    pub fn load(model_path: &Path, config: VadConfig) -> Result<Self> {
        let session = Session::builder()
            .and_then(|mut builder| builder.commit_from_file(model_path))
            .map_err(|e| Error::ModelLoad {
                path: model_path.to_path_buf(),
                source: e,
            })?;

        let state_output = session
            .outputs()
            .iter()
            .position(|o| o.name() == "stateN" || o.name() == "state")
            .ok_or_else(|| Error::Detection {
                reason: format!(
                    "model '{}' has no recurrent state output; expected a Silero VAD export",
                    model_path.display()
                ),
            })?;
        let prob_output = session
            .outputs()
            .iter()
            .position(|o| o.name() != "stateN" && o.name() != "state")
            .ok_or_else(|| Error::Detection {
                reason: "model has no probability output".to_owned(),
            })?;

        debug!(
            "Loaded VAD model '{}' (prob output #{prob_output}, state output #{state_output})",
            model_path.display()
        );

        Ok(Self {
            session,
            config,
            prob_output,
            state_output,
        })
    }

    /// Detector configuration in effect.
    #[must_use]
    pub fn config(&self) -> &VadConfig {
        &self.config
    }

    /// Detect speech intervals in a mono waveform at the analysis rate.
    ///
    /// Returns segments ordered by start, non-overlapping, in sample
    /// offsets. An all-silence waveform yields an empty vector.
    pub fn detect(&mut self, samples: &[f32]) -> Result<Vec<SpeechSegment>> {
        if samples.is_empty() {
            return Ok(Vec::new());
        }
        let probs = self.frame_probabilities(samples)?;
        Ok(segments_from_probs(&probs, samples.len(), &self.config))
    }

    /// Run the model over consecutive frames, threading the recurrent state.
    fn frame_probabilities(&mut self, samples: &[f32]) -> Result<Vec<f32>> {
        let mut state = vec![0.0f32; vad::STATE_LEN];
        let mut probs = Vec::with_capacity(samples.len() / vad::FRAME_SIZE + 1);

        for chunk in samples.chunks(vad::FRAME_SIZE) {
            let mut frame = vec![0.0f32; vad::FRAME_SIZE];
            frame[..chunk.len()].copy_from_slice(chunk);

            let inputs = build_inputs(&frame, &state, self.config.sample_rate)?;
            let outputs = self
                .session
                .run(inputs)
                .map_err(|e| Error::Detection {
                    reason: format!("model run failed: {e}"),
                })?;

            let (_, prob_values) = outputs[self.prob_output]
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::Detection {
                    reason: format!("probability output was not an f32 tensor: {e}"),
                })?;
            let prob = *prob_values.first().ok_or_else(|| Error::Detection {
                reason: "probability output was empty".to_owned(),
            })?;
            probs.push(prob);

            let (_, state_values) = outputs[self.state_output]
                .try_extract_tensor::<f32>()
                .map_err(|e| Error::Detection {
                    reason: format!("state output was not an f32 tensor: {e}"),
                })?;
            if state_values.len() != state.len() {
                return Err(Error::Detection {
                    reason: format!(
                        "state output length {} does not match expected {}",
                        state_values.len(),
                        state.len()
                    ),
                });
            }
            state.copy_from_slice(state_values);
        }

        Ok(probs)
    }
}

fn build_inputs(
    frame: &[f32],
    state: &[f32],
    sample_rate: u32,
) -> Result<Vec<(String, SessionInputValue<'static>)>> {
    let audio = Tensor::from_array(([1usize, frame.len()], frame.to_vec().into_boxed_slice()))
        .map_err(|e| Error::Detection {
            reason: format!("failed to build audio input tensor: {e}"),
        })?;
    let state = Tensor::from_array(([2usize, 1, 128], state.to_vec().into_boxed_slice()))
        .map_err(|e| Error::Detection {
            reason: format!("failed to build state input tensor: {e}"),
        })?;
    let sr = Tensor::from_array(((), vec![i64::from(sample_rate)].into_boxed_slice())).map_err(
        |e| Error::Detection {
            reason: format!("failed to build sample-rate input tensor: {e}"),
        },
    )?;

    Ok(vec![
        ("input".to_owned(), SessionInputValue::Owned(audio.into_dyn())),
        ("state".to_owned(), SessionInputValue::Owned(state.into_dyn())),
        ("sr".to_owned(), SessionInputValue::Owned(sr.into_dyn())),
    ])
}

/// Reduce per-frame speech probabilities to sample-domain intervals.
///
/// Standard Silero semantics: a frame at or above `threshold` opens a
/// segment; the segment closes once probabilities stay below
/// `threshold - 0.15` for at least the minimum silence duration. Segments
/// shorter than the minimum speech duration are discarded, and surviving
/// segments are padded on both edges (clamped to the waveform).
#[must_use]
pub fn segments_from_probs(
    probs: &[f32],
    total_samples: usize,
    config: &VadConfig,
) -> Vec<SpeechSegment> {
    let min_speech = config.samples_for_ms(config.min_speech_ms);
    let min_silence = config.samples_for_ms(config.min_silence_ms);
    let pad = config.samples_for_ms(config.speech_pad_ms);
    let neg_threshold = config.neg_threshold();

    let mut segments = Vec::new();
    let mut triggered = false;
    let mut current_start = 0usize;
    let mut temp_end = 0usize;

    for (i, &prob) in probs.iter().enumerate() {
        let offset = i * vad::FRAME_SIZE;

        if prob >= config.threshold && temp_end != 0 {
            temp_end = 0;
        }

        if prob >= config.threshold && !triggered {
            triggered = true;
            current_start = offset;
            continue;
        }

        if prob < neg_threshold && triggered {
            if temp_end == 0 {
                temp_end = offset;
            }
            if offset - temp_end >= min_silence {
                if temp_end - current_start >= min_speech {
                    segments.push(SpeechSegment {
                        start: current_start,
                        end: temp_end,
                    });
                }
                triggered = false;
                temp_end = 0;
            }
        }
    }

    if triggered && total_samples.saturating_sub(current_start) >= min_speech {
        segments.push(SpeechSegment {
            start: current_start,
            end: total_samples,
        });
    }

    for segment in &mut segments {
        segment.start = segment.start.saturating_sub(pad);
        segment.end = (segment.end + pad).min(total_samples);
    }

    segments
}
