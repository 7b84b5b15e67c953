//! Configuration type definitions.

use crate::constants::{DEFAULT_MERGE_GAP_MS, DEFAULT_OUTPUT_DIR, vad};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Voice activity detector settings.
    #[serde(default)]
    pub detector: DetectorConfig,

    /// Segment merging settings.
    #[serde(default)]
    pub segmenter: SegmenterConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Voice activity detector settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Path to the Silero VAD ONNX model.
    pub model: Option<PathBuf>,

    /// Speech probability threshold (0.0-1.0).
    pub threshold: f32,

    /// Minimum speech duration in milliseconds.
    pub min_speech_ms: u32,

    /// Minimum silence duration in milliseconds.
    pub min_silence_ms: u32,

    /// Edge padding in milliseconds.
    pub speech_pad_ms: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model: None,
            threshold: vad::DEFAULT_THRESHOLD,
            min_speech_ms: vad::DEFAULT_MIN_SPEECH_MS,
            min_silence_ms: vad::DEFAULT_MIN_SILENCE_MS,
            speech_pad_ms: vad::DEFAULT_SPEECH_PAD_MS,
        }
    }
}

/// Segment merging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Maximum bridged silence between segments, in milliseconds.
    pub merge_gap_ms: u32,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            merge_gap_ms: DEFAULT_MERGE_GAP_MS,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory labeled clips are written to.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}
