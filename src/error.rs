//! Error types for numclip.

/// Result type alias for numclip operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for numclip.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// ffmpeg is not available on PATH.
    #[error("ffmpeg not found on PATH; install ffmpeg to transcode and cut audio")]
    FfmpegMissing,

    /// An external tool exited with a failure status.
    #[error("{tool} failed with status {status}: {stderr}")]
    ToolFailed {
        /// Name of the tool that failed.
        tool: &'static str,
        /// Exit status description.
        status: String,
        /// Captured stderr, trimmed.
        stderr: String,
    },

    /// Source directory does not exist.
    #[error("source directory does not exist: {path}")]
    SourceDirNotFound {
        /// Path to the missing directory.
        path: std::path::PathBuf,
    },

    /// No source audio files found.
    #[error("no source audio files found in '{path}'")]
    NoSourceFiles {
        /// Path to the scanned directory.
        path: std::path::PathBuf,
    },

    /// VAD model file does not exist.
    #[error("VAD model file does not exist: {path}")]
    ModelFileNotFound {
        /// Path to the missing model file.
        path: std::path::PathBuf,
    },

    /// No VAD model configured.
    #[error("no VAD model configured (use --model or set detector.model in config)")]
    ModelNotConfigured,

    /// Failed to load the VAD model.
    #[error("failed to load VAD model '{path}'")]
    ModelLoad {
        /// Path to the model file.
        path: std::path::PathBuf,
        /// Underlying ONNX Runtime error.
        #[source]
        source: ort::Error,
    },

    /// Detection inference failed.
    #[error("VAD inference failed: {reason}")]
    Detection {
        /// Description of the inference failure.
        reason: String,
    },

    /// Failed to read the analysis WAV produced by the transcoder.
    #[error("failed to read analysis WAV '{path}'")]
    AnalysisWavRead {
        /// Path to the WAV file.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Analysis WAV did not match the expected format.
    #[error("analysis WAV '{path}' has unexpected format: {detail}")]
    AnalysisWavFormat {
        /// Path to the WAV file.
        path: std::path::PathBuf,
        /// Description of the mismatch.
        detail: String,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create per-job scratch directory.
    #[error("failed to create scratch directory")]
    ScratchDirCreateFailed {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
