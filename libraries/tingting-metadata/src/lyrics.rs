//! Sidecar lyric matching
//!
//! A lyric file `dir/stem.lrc` belongs to the audio file sharing its stem.
//! Files next to the lyric are tried first, in scannable-format priority
//! order; then the lyric's directory subtree is walked.

use crate::fs::LibraryFs;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tingting_core::AudioFormat;

/// Extension of lyric sidecar files
pub const LYRIC_EXTENSION: &str = "lrc";

pub fn is_lyric_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(LYRIC_EXTENSION))
}

/// Audio file a lyric belongs to, or `None` when nothing matches
pub fn find_audio_for_lyric(fs: &dyn LibraryFs, lyric_path: &Path) -> Option<PathBuf> {
    let stem = lyric_path.file_stem()?;
    let dir = lyric_path.parent().unwrap_or_else(|| Path::new(""));

    for format in AudioFormat::SCANNABLE {
        let mut name = OsString::from(stem);
        name.push(".");
        name.push(format.extension());

        let candidate = dir.join(name);
        if fs.exists(&candidate) {
            return Some(candidate);
        }
    }

    fs.walk(dir)
        .filter_map(std::result::Result::ok)
        .find(|path| {
            path.file_stem() == Some(stem) && AudioFormat::scannable_from_path(path).is_some()
        })
}
