//! Track types

use super::{Album, AlbumId, Artist, ArtistId, Lyric};
use serde::{Deserialize, Serialize};

pub type TrackId = i64;

/// A catalogued audio file. `file_path` is unique across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist_id: Option<ArtistId>,
    pub album_id: Option<AlbumId>,
    pub file_path: String,
    /// Lower-cased extension without the leading dot
    pub file_type: String,
    /// Duration in seconds
    pub duration: f64,
    /// Bits per second
    pub bitrate: Option<i64>,
    /// Hz
    pub sample_rate: Option<i64>,
}

/// Data for creating a new track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTrack {
    pub title: String,
    pub artist_id: Option<ArtistId>,
    pub album_id: Option<AlbumId>,
    pub file_path: String,
    pub file_type: String,
    pub duration: f64,
    pub bitrate: Option<i64>,
    pub sample_rate: Option<i64>,
}

/// Track with its artist, album and lyric resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackWithDetails {
    #[serde(flatten)]
    pub track: Track,
    pub artist: Option<Artist>,
    pub album: Option<Album>,
    pub lyric: Option<Lyric>,
}
