//! Per-label clip extraction into the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::encoder;
use crate::error::{Error, Result};
use crate::jobs::LabeledClip;
use crate::transcode;

/// Extracts labeled clips from a job's analysis WAV into a fixed output
/// directory.
///
/// Output paths are keyed by label only: a later job computing the same
/// label overwrites the earlier file. Labels are globally unique under
/// correct input, so this is accepted as last-write-wins.
pub struct ClipExtractor {
    output_dir: PathBuf,
}

impl ClipExtractor {
    /// Create an extractor, creating the output directory if needed.
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&output_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: output_dir.clone(),
            source: e,
        })?;
        Ok(Self { output_dir })
    }

    /// Output directory the clips are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Deterministic output path for a label.
    #[must_use]
    pub fn output_path(&self, label: u32) -> PathBuf {
        self.output_dir
            .join(format!("{label}.{}", encoder::CLIP_EXTENSION))
    }

    /// Cut one labeled clip out of the analysis WAV and encode it.
    pub fn extract(&self, analysis_wav: &Path, clip: &LabeledClip) -> Result<PathBuf> {
        let dest = self.output_path(clip.label);
        debug!(
            "Extracting label {} [{:.3}s - {:.3}s] -> {}",
            clip.label,
            clip.start_secs,
            clip.end_secs,
            dest.display()
        );
        transcode::cut_clip(analysis_wav, clip.start_secs, clip.end_secs, &dest)?;
        Ok(dest)
    }
}
