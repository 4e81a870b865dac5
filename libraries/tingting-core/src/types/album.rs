//! Album types

use super::ArtistId;
use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// An album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub artist_id: Option<ArtistId>,
    pub cover_path: Option<String>,
}
