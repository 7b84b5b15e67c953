//! CLI argument definitions.

use crate::constants::DEFAULT_SOURCE_DIR;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Split spoken-number recordings into labeled per-number clips.
#[derive(Debug, Parser)]
#[command(name = "numclip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory of source recordings.
    #[arg(default_value = DEFAULT_SOURCE_DIR)]
    pub source_dir: PathBuf,

    /// Common options for segmentation.
    #[command(flatten)]
    pub segment: SegmentArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the segmentation run.
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Path to the Silero VAD ONNX model (overrides config).
    #[arg(short, long, env = "NUMCLIP_MODEL")]
    pub model: Option<PathBuf>,

    /// Output directory for labeled clips (overrides config).
    #[arg(short, long, env = "NUMCLIP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Speech probability threshold (0.0-1.0).
    #[arg(short = 't', long, value_parser = parse_threshold, env = "NUMCLIP_THRESHOLD")]
    pub threshold: Option<f32>,

    /// Minimum speech duration in milliseconds.
    #[arg(long, value_parser = parse_millis)]
    pub min_speech_ms: Option<u32>,

    /// Minimum silence duration in milliseconds.
    #[arg(long, value_parser = parse_millis)]
    pub min_silence_ms: Option<u32>,

    /// Edge padding per segment in milliseconds.
    #[arg(long, value_parser = parse_millis)]
    pub speech_pad_ms: Option<u32>,

    /// Maximum bridged silence between detected segments in milliseconds.
    #[arg(long, value_parser = parse_millis, env = "NUMCLIP_MERGE_GAP_MS")]
    pub merge_gap_ms: Option<u32>,

    /// Stop on the first job that fails.
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress informational output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace, -vvv: trace+ORT).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse and validate a threshold value.
fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(0.0..=1.0).contains(&value) {
        return Err(format!(
            "threshold must be between 0.0 and 1.0, got {value}"
        ));
    }

    Ok(value)
}

/// Parse and validate a millisecond duration.
fn parse_millis(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid duration in milliseconds"))?;

    if value > 60_000 {
        return Err(format!("duration cannot exceed 60000 ms, got {value}"));
    }

    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threshold_valid() {
        assert_eq!(parse_threshold("0.5").ok(), Some(0.5));
        assert_eq!(parse_threshold("0.0").ok(), Some(0.0));
        assert_eq!(parse_threshold("1.0").ok(), Some(1.0));
    }

    #[test]
    fn test_parse_threshold_invalid() {
        assert!(parse_threshold("1.5").is_err());
        assert!(parse_threshold("-0.1").is_err());
        assert!(parse_threshold("abc").is_err());
    }

    #[test]
    fn test_parse_millis_bounds() {
        assert_eq!(parse_millis("150").ok(), Some(150));
        assert_eq!(parse_millis("0").ok(), Some(0));
        assert!(parse_millis("60001").is_err());
        assert!(parse_millis("-5").is_err());
    }

    #[test]
    fn test_cli_defaults_source_dir() {
        let cli = Cli::try_parse_from(["numclip"]).unwrap();
        assert_eq!(cli.source_dir, PathBuf::from(DEFAULT_SOURCE_DIR));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "numclip",
            "recordings",
            "-m",
            "silero_vad.onnx",
            "-t",
            "0.35",
            "--merge-gap-ms",
            "200",
            "-q",
        ])
        .unwrap();

        assert_eq!(cli.source_dir, PathBuf::from("recordings"));
        assert_eq!(cli.segment.model, Some(PathBuf::from("silero_vad.onnx")));
        assert_eq!(cli.segment.threshold, Some(0.35));
        assert_eq!(cli.segment.merge_gap_ms, Some(200));
        assert!(cli.segment.quiet);
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["numclip", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_cli_rejects_bad_threshold() {
        assert!(Cli::try_parse_from(["numclip", "-t", "2.0"]).is_err());
    }
}
