//! Tag families and per-family field extraction
//!
//! Each container stores title, artist and album under its own native keys.
//! A [`TagFamily`] names one such key scheme, and its [`TagExtractor`] turns a
//! [`RawTags`] map (native key → values) into [`TagFields`].

use lofty::{Tag, TagType};
use std::collections::HashMap;
use tingting_core::AudioFormat;

/// Native tag key → values, as read from one tag of a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTags {
    items: HashMap<String, Vec<String>>,
}

impl RawTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.entry(key.into()).or_default().push(value.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// First value stored under exactly `key`
    pub fn first(&self, key: &str) -> Option<&str> {
        self.items
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value stored under `key`, ignoring ASCII case
    pub fn first_ignore_case(&self, key: &str) -> Option<&str> {
        self.first(key).or_else(|| {
            self.items
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .and_then(|(_, values)| values.first())
                .map(String::as_str)
        })
    }

    /// Collect the text items of a lofty tag under their native keys
    ///
    /// ID3v1 has no frame ids of its own, so its fields are keyed by the
    /// matching ID3v2 frames.
    pub fn from_lofty(tag: &Tag) -> Self {
        let key_scheme = match tag.tag_type() {
            TagType::Id3v1 => TagType::Id3v2,
            other => other,
        };
        let mut raw = Self::new();

        for item in tag.items() {
            let (Some(key), Some(text)) = (item.key().map_key(key_scheme, true), item.value().text())
            else {
                continue;
            };
            raw.insert(key, text);
        }

        raw
    }
}

/// Title, artist and album found in a tag; `None` keeps the caller's default
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFields {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
}

/// Turns native tag keys into [`TagFields`]
pub trait TagExtractor: Send + Sync {
    fn extract(&self, raw: &RawTags) -> TagFields;
}

/// Key scheme used by a container format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagFamily {
    /// ID3v2 frames, or ID3v1 when that is all an mp3 has
    Id3,
    /// Vorbis comments (flac, ogg)
    VorbisComment,
    /// MP4 `ilst` atoms (aac, alac)
    Atom,
    /// No tags read (wav, aiff, ape)
    None,
}

impl TagFamily {
    pub fn for_format(format: AudioFormat) -> Self {
        match format {
            AudioFormat::Mp3 => TagFamily::Id3,
            AudioFormat::Flac | AudioFormat::Ogg => TagFamily::VorbisComment,
            AudioFormat::Aac | AudioFormat::Alac => TagFamily::Atom,
            AudioFormat::Wav | AudioFormat::Aiff | AudioFormat::Ape => TagFamily::None,
        }
    }

    /// lofty tag types holding this family's keys, most preferred first
    pub fn tag_types(self) -> &'static [TagType] {
        match self {
            TagFamily::Id3 => &[TagType::Id3v2, TagType::Id3v1],
            TagFamily::VorbisComment => &[TagType::VorbisComments],
            TagFamily::Atom => &[TagType::Mp4Ilst],
            TagFamily::None => &[],
        }
    }

    pub fn extractor(self) -> Option<&'static dyn TagExtractor> {
        match self {
            TagFamily::Id3 => Some(&Id3Extractor),
            TagFamily::VorbisComment => Some(&VorbisExtractor),
            TagFamily::Atom => Some(&AtomExtractor),
            TagFamily::None => None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// First non-empty value among `keys`, in order
fn first_of(raw: &RawTags, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| non_empty(raw.first(key)))
}

/// `TIT2|TITLE`, `TPE1|ARTIST`, `TALB|ALBUM`
#[derive(Debug, Clone, Copy)]
pub struct Id3Extractor;

impl TagExtractor for Id3Extractor {
    fn extract(&self, raw: &RawTags) -> TagFields {
        TagFields {
            title: first_of(raw, &["TIT2", "TITLE"]),
            artist: first_of(raw, &["TPE1", "ARTIST"]),
            album: first_of(raw, &["TALB", "ALBUM"]),
        }
    }
}

/// Case-insensitive `title`, `artist`, `album`
#[derive(Debug, Clone, Copy)]
pub struct VorbisExtractor;

impl TagExtractor for VorbisExtractor {
    fn extract(&self, raw: &RawTags) -> TagFields {
        TagFields {
            title: non_empty(raw.first_ignore_case("title")),
            artist: non_empty(raw.first_ignore_case("artist")),
            album: non_empty(raw.first_ignore_case("album")),
        }
    }
}

/// `©nam|title`, `©ART|artist`, `©alb|album`
#[derive(Debug, Clone, Copy)]
pub struct AtomExtractor;

impl TagExtractor for AtomExtractor {
    fn extract(&self, raw: &RawTags) -> TagFields {
        TagFields {
            title: first_of(raw, &["\u{a9}nam", "title"]),
            artist: first_of(raw, &["\u{a9}ART", "artist"]),
            album: first_of(raw, &["\u{a9}alb", "album"]),
        }
    }
}
