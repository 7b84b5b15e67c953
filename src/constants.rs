//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "numclip";

/// Sample rate of the analysis waveform fed to the detector, in Hz.
///
/// Every source recording is transcoded to mono at this rate before
/// detection; all sample-domain offsets in the pipeline are relative to it.
pub const ANALYSIS_SAMPLE_RATE: u32 = 16_000;

/// Default maximum silence between two detected segments that is still
/// bridged into one merged segment, in milliseconds.
pub const DEFAULT_MERGE_GAP_MS: u32 = 150;

/// Default source directory scanned for recordings.
pub const DEFAULT_SOURCE_DIR: &str = "assets";

/// Default output directory for labeled clips.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Voice activity detection defaults.
pub mod vad {
    /// Samples per inference frame. At 16 kHz, 512 samples = 32 ms.
    pub const FRAME_SIZE: usize = 512;

    /// Default speech probability threshold.
    pub const DEFAULT_THRESHOLD: f32 = 0.5;

    /// Hysteresis subtracted from the threshold when deciding that speech
    /// has ended.
    pub const NEG_THRESHOLD_MARGIN: f32 = 0.15;

    /// Default minimum speech duration in milliseconds. Shorter bursts are
    /// discarded as noise.
    pub const DEFAULT_MIN_SPEECH_MS: u32 = 200;

    /// Default minimum silence duration in milliseconds before a segment is
    /// closed.
    pub const DEFAULT_MIN_SILENCE_MS: u32 = 150;

    /// Default padding added to both edges of each segment, in milliseconds.
    pub const DEFAULT_SPEECH_PAD_MS: u32 = 50;

    /// Silero state tensor shape is `[2, 1, 128]`.
    pub const STATE_LEN: usize = 2 * 128;
}

/// Clip encoder settings.
pub mod encoder {
    /// Output clip file extension.
    pub const CLIP_EXTENSION: &str = "mp3";

    /// MP3 bitrate passed to the encoder.
    pub const MP3_BITRATE: &str = "192k";
}

/// Supported source audio extensions for directory scans.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "aac", "flac"];
