//! TingTing Music Core
//!
//! Domain types, the catalog storage trait and error handling shared by the
//! scanner, the SQLite catalog and the HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Artist`, `Album`, `Track`, `Lyric`, `Playlist`, `PlaylistTrack`
//! - **Audio Formats**: the extension table shared by scanning and streaming
//! - **Core Trait**: `CatalogStore`, implemented by `tingting-storage`
//! - **Error Handling**: Unified `TingError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use tingting_core::types::{AudioFormat, PlaylistType};
//!
//! let format = AudioFormat::from_extension("FLAC").unwrap();
//! assert_eq!(format.mime_type(), "audio/flac");
//! assert_eq!(PlaylistType::Favorite.as_str(), "favorite");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

pub use error::{Result, TingError};
pub use storage::CatalogStore;

pub use types::{
    Album, AlbumId, Artist, ArtistId, AudioFormat, CreatePlaylist, CreateTrack, Lyric, LyricId,
    Page, Playlist, PlaylistId, PlaylistTrack, PlaylistTrackId, PlaylistType, PlaylistWithTracks,
    Track, TrackId, TrackWithDetails,
};
