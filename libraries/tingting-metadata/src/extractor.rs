/// Metadata extraction using lofty
use crate::error::{MetadataError, Result};
use crate::fs::ReadSeek;
use crate::tags::{RawTags, TagFamily};
use lofty::{AudioFile, FileType, Probe, TaggedFileExt};
use std::path::Path;
use tingting_core::AudioFormat;

/// What a scan records for one audio file
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    /// Tag title, or the file name without extension
    pub title: String,
    /// Empty when untagged
    pub artist: String,
    /// Empty when untagged
    pub album: String,
    pub duration_seconds: f64,
    /// Bits per second
    pub bitrate: Option<i64>,
    /// Hz
    pub sample_rate: Option<i64>,
}

impl TrackMetadata {
    /// Defaults for a file nothing could be read from
    pub fn from_path(path: &Path) -> Self {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            title,
            artist: String::new(),
            album: String::new(),
            duration_seconds: 0.0,
            bitrate: None,
            sample_rate: None,
        }
    }
}

/// Reads metadata from an opened audio file
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, path: &Path, format: AudioFormat, reader: Box<dyn ReadSeek>)
        -> Result<TrackMetadata>;
}

/// Extractor backed by lofty
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyExtractor;

impl LoftyExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataExtractor for LoftyExtractor {
    fn extract(
        &self,
        path: &Path,
        format: AudioFormat,
        reader: Box<dyn ReadSeek>,
    ) -> Result<TrackMetadata> {
        let mut probe = Probe::new(reader).guess_file_type()?;
        if probe.file_type().is_none() {
            let by_extension = FileType::from_ext(format.extension())
                .ok_or_else(|| MetadataError::UnsupportedFormat(path.display().to_string()))?;
            probe = probe.set_file_type(by_extension);
        }

        let tagged_file = probe.read()?;
        let mut metadata = TrackMetadata::from_path(path);

        // Stream info, each property on its own
        let properties = tagged_file.properties();
        metadata.duration_seconds = properties.duration().as_secs_f64();
        metadata.bitrate = properties
            .audio_bitrate()
            .filter(|kbps| *kbps > 0)
            .map(|kbps| i64::from(kbps) * 1000);
        metadata.sample_rate = properties
            .sample_rate()
            .filter(|hz| *hz > 0)
            .map(i64::from);

        let family = TagFamily::for_format(format);
        let Some(extractor) = family.extractor() else {
            return Ok(metadata);
        };

        let tag = family
            .tag_types()
            .iter()
            .find_map(|tag_type| tagged_file.tag(*tag_type));

        if let Some(tag) = tag {
            let fields = extractor.extract(&RawTags::from_lofty(tag));
            if let Some(title) = fields.title {
                metadata.title = title;
            }
            if let Some(artist) = fields.artist {
                metadata.artist = artist;
            }
            if let Some(album) = fields.album {
                metadata.album = album;
            }
        }

        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn default_title_is_file_stem() {
        let metadata = TrackMetadata::from_path(Path::new("/music/My Song.flac"));
        assert_eq!(metadata.title, "My Song");
        assert_eq!(metadata.artist, "");
        assert_eq!(metadata.duration_seconds, 0.0);
        assert_eq!(metadata.bitrate, None);
    }

    #[test]
    fn garbage_container_is_an_error() {
        let extractor = LoftyExtractor::new();
        let result = extractor.extract(
            Path::new("/music/broken.flac"),
            AudioFormat::Flac,
            Box::new(Cursor::new(b"definitely not audio".to_vec())),
        );
        assert!(result.is_err());
    }
}
