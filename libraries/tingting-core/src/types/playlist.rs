//! Playlist types

use super::{Track, TrackId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type PlaylistId = i64;
pub type PlaylistTrackId = i64;

/// Kind of playlist. Everything except `Custom` is system-managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaylistType {
    #[default]
    Custom,
    Favorite,
    Recent,
    All,
}

impl PlaylistType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistType::Custom => "custom",
            PlaylistType::Favorite => "favorite",
            PlaylistType::Recent => "recent",
            PlaylistType::All => "all",
        }
    }
}

impl fmt::Display for PlaylistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlaylistType {
    type Err = crate::TingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "custom" => Ok(PlaylistType::Custom),
            "favorite" => Ok(PlaylistType::Favorite),
            "recent" => Ok(PlaylistType::Recent),
            "all" => Ok(PlaylistType::All),
            other => Err(crate::TingError::invalid_input(format!(
                "unknown playlist type: {other}"
            ))),
        }
    }
}

/// A playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    #[serde(rename = "type")]
    pub playlist_type: PlaylistType,
    /// Directory associated with the playlist, if any
    pub music_dir: Option<String>,
}

/// Data for creating a new playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlaylist {
    pub name: String,
    #[serde(rename = "type", default)]
    pub playlist_type: PlaylistType,
    #[serde(default)]
    pub music_dir: Option<String>,
}

/// Membership of a track in a playlist. `order` is caller-supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: PlaylistTrackId,
    pub playlist_id: PlaylistId,
    pub track_id: TrackId,
    pub order: i64,
}

/// Playlist with its tracks sorted by ascending `order`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistWithTracks {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub tracks: Vec<Track>,
}
