//! Audio container formats known to the catalog
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Audio container format, keyed by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Flac,
    Wav,
    Aac,
    Ogg,
    Alac,
    Aiff,
    Ape,
}

impl AudioFormat {
    /// Formats picked up by library scans, in lyric-matching priority order
    pub const SCANNABLE: [AudioFormat; 7] = [
        AudioFormat::Mp3,
        AudioFormat::Flac,
        AudioFormat::Wav,
        AudioFormat::Aac,
        AudioFormat::Ogg,
        AudioFormat::Alac,
        AudioFormat::Aiff,
    ];

    /// Media type used when the stored extension is unknown
    pub const DEFAULT_MIME_TYPE: &'static str = "audio/mpeg";

    /// Parse a file extension (without dot, any case)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(AudioFormat::Mp3),
            "flac" => Some(AudioFormat::Flac),
            "wav" => Some(AudioFormat::Wav),
            "aac" => Some(AudioFormat::Aac),
            "ogg" => Some(AudioFormat::Ogg),
            "alac" => Some(AudioFormat::Alac),
            "aiff" => Some(AudioFormat::Aiff),
            "ape" => Some(AudioFormat::Ape),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Scannable format of a path, `None` for anything a scan ignores
    pub fn scannable_from_path(path: &Path) -> Option<Self> {
        Self::from_path(path).filter(AudioFormat::is_scannable)
    }

    pub fn is_scannable(&self) -> bool {
        Self::SCANNABLE.contains(self)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Flac => "flac",
            AudioFormat::Wav => "wav",
            AudioFormat::Aac => "aac",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Alac => "alac",
            AudioFormat::Aiff => "aiff",
            AudioFormat::Ape => "ape",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Flac => "audio/flac",
            AudioFormat::Wav => "audio/wav",
            AudioFormat::Aac => "audio/aac",
            AudioFormat::Ogg => "audio/ogg",
            AudioFormat::Alac => "audio/alac",
            AudioFormat::Aiff => "audio/aiff",
            AudioFormat::Ape => "audio/ape",
        }
    }

    /// Media type for a stored file path, falling back to `audio/mpeg`
    pub fn mime_type_for_path(path: &Path) -> &'static str {
        Self::from_path(path).map_or(Self::DEFAULT_MIME_TYPE, |f| f.mime_type())
    }
}
