//! Lyric types

use super::TrackId;
use serde::{Deserialize, Serialize};

pub type LyricId = i64;

/// Raw lyric text attached to a track (at most one per track)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyric {
    pub id: LyricId,
    pub track_id: TrackId,
    pub content: String,
}
