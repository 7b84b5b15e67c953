//! Source file discovery.

use std::path::{Path, PathBuf};

use crate::constants::AUDIO_EXTENSIONS;
use crate::error::{Error, Result};

/// Collect candidate source recordings from a directory, sorted by file
/// name for deterministic discovery order.
///
/// The scan is non-recursive: a corpus directory is flat by convention.
/// A missing directory is a fatal precondition; an empty result is left to
/// the caller to classify.
pub fn collect_source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::SourceDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_audio_file(&path) {
            files.push(path);
        }
    }

    files.sort_by_key(|p| p.file_name().map(std::ffi::OsStr::to_os_string));
    Ok(files)
}

/// Check if a file has a supported audio extension.
fn is_audio_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        AUDIO_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(OsStr::new(candidate)))
    })
}
