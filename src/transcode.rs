//! ffmpeg collaborator: analysis transcodes and clip cuts.
//!
//! ffmpeg is invoked once per job to produce the 16 kHz mono analysis WAV,
//! and once per accepted clip to cut and encode the output MP3. The tool is
//! a hard precondition for a run; per-invocation failures carry the captured
//! stderr.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::constants::{ANALYSIS_SAMPLE_RATE, encoder};
use crate::error::{Error, Result};

/// True if ffmpeg can be spawned from PATH.
#[must_use]
pub fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Fail fast when ffmpeg is missing. Checked once, before any job runs.
pub fn require_ffmpeg() -> Result<()> {
    if ffmpeg_available() {
        Ok(())
    } else {
        Err(Error::FfmpegMissing)
    }
}

/// Transcode a source recording to a mono analysis WAV at the detector's
/// sample rate.
pub fn to_analysis_wav(source: &Path, dest: &Path) -> Result<()> {
    let args = [
        "-hide_banner".to_owned(),
        "-loglevel".to_owned(),
        "error".to_owned(),
        "-y".to_owned(),
        "-i".to_owned(),
        source.display().to_string(),
        "-ac".to_owned(),
        "1".to_owned(),
        "-ar".to_owned(),
        ANALYSIS_SAMPLE_RATE.to_string(),
        "-c:a".to_owned(),
        "pcm_s16le".to_owned(),
        dest.display().to_string(),
    ];
    run_ffmpeg(&args)
}

/// Cut `[start_secs, end_secs]` out of an analysis WAV and encode it as an
/// MP3 clip.
pub fn cut_clip(source_wav: &Path, start_secs: f64, end_secs: f64, dest: &Path) -> Result<()> {
    let args = [
        "-hide_banner".to_owned(),
        "-loglevel".to_owned(),
        "error".to_owned(),
        "-y".to_owned(),
        "-i".to_owned(),
        source_wav.display().to_string(),
        "-ss".to_owned(),
        format!("{start_secs:.3}"),
        "-to".to_owned(),
        format!("{end_secs:.3}"),
        "-vn".to_owned(),
        "-c:a".to_owned(),
        "libmp3lame".to_owned(),
        "-b:a".to_owned(),
        encoder::MP3_BITRATE.to_owned(),
        dest.display().to_string(),
    ];
    run_ffmpeg(&args)
}

fn run_ffmpeg(args: &[String]) -> Result<()> {
    let output = Command::new("ffmpeg")
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(Error::ToolFailed {
        tool: "ffmpeg",
        status: output.status.to_string(),
        stderr: stderr_tail(&stderr),
    })
}

/// Keep error messages bounded: ffmpeg can be chatty even at loglevel error.
fn stderr_tail(stderr: &str) -> String {
    const MAX_LINES: usize = 4;
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(MAX_LINES);
    lines[start..].join(" | ")
}
