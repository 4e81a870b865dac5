//! Catalog storage trait

use crate::error::Result;
use crate::types::{
    Album, AlbumId, Artist, ArtistId, CreatePlaylist, CreateTrack, Lyric, Page, Playlist,
    PlaylistId, PlaylistTrack, PlaylistWithTracks, Track, TrackId, TrackWithDetails,
};
use async_trait::async_trait;

/// Catalog of artists, albums, tracks, lyrics and playlists
///
/// The store owns every uniqueness rule (artist name, track path, one lyric
/// per track). Callers such as the library scanner only go through the
/// idempotent operations below and never check-then-insert themselves.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ========================================================================
    // Artists
    // ========================================================================

    /// Get artists ordered by id
    async fn get_artists(&self, page: Page) -> Result<Vec<Artist>>;

    /// Get artist by ID
    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>>;

    /// Exact, case-sensitive name lookup; creates the artist on a miss
    async fn find_or_create_artist(&self, name: &str) -> Result<Artist>;

    // ========================================================================
    // Albums
    // ========================================================================

    /// Get albums ordered by id
    async fn get_albums(&self, page: Page) -> Result<Vec<Album>>;

    /// Get album by ID
    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>>;

    /// Find an album by exact title and artist
    async fn find_album(&self, title: &str, artist_id: Option<ArtistId>) -> Result<Option<Album>>;

    /// Always inserts a new album row
    async fn create_album(&self, title: &str, artist_id: Option<ArtistId>) -> Result<Album>;

    // ========================================================================
    // Tracks
    // ========================================================================

    /// Get tracks ordered by id
    async fn get_tracks(&self, page: Page) -> Result<Vec<Track>>;

    /// Get track by ID
    async fn get_track(&self, id: TrackId) -> Result<Option<Track>>;

    /// Look a track up by its exact file path
    async fn find_track_by_path(&self, path: &str) -> Result<Option<Track>>;

    /// Always inserts; the caller has already checked the path
    async fn create_track(&self, track: CreateTrack) -> Result<Track>;

    /// Delete a track; `false` if it did not exist
    async fn delete_track(&self, id: TrackId) -> Result<bool>;

    /// Track with artist, album and lyric resolved
    async fn get_track_with_details(&self, id: TrackId) -> Result<Option<TrackWithDetails>>;

    /// Page of tracks with artist, album and lyric resolved
    async fn get_tracks_with_details(&self, page: Page) -> Result<Vec<TrackWithDetails>>;

    // ========================================================================
    // Lyrics
    // ========================================================================

    /// Get the lyric of a track
    async fn get_lyric(&self, track_id: TrackId) -> Result<Option<Lyric>>;

    /// Replace the lyric content of a track, inserting it if absent
    async fn upsert_lyric(&self, track_id: TrackId, content: &str) -> Result<Lyric>;

    /// Delete the lyric of a track; `false` if there was none
    async fn delete_lyric(&self, track_id: TrackId) -> Result<bool>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Get playlists ordered by id
    async fn get_playlists(&self, page: Page) -> Result<Vec<Playlist>>;

    /// Get playlist by ID
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>>;

    /// Playlist with tracks sorted by ascending membership order
    async fn get_playlist_with_tracks(&self, id: PlaylistId) -> Result<Option<PlaylistWithTracks>>;

    /// Create a new playlist
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist>;

    /// Rename a playlist; `None` if it does not exist
    async fn update_playlist(&self, id: PlaylistId, name: &str) -> Result<Option<Playlist>>;

    /// Delete a playlist and its memberships; `false` if it did not exist
    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool>;

    /// Create the favorite, recent and all-music playlists if missing
    async fn ensure_default_playlists(&self, music_dir: &str) -> Result<()>;

    /// Add a track to a playlist at the given order value
    async fn add_track_to_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
        order: i64,
    ) -> Result<PlaylistTrack>;

    /// Remove a track from a playlist; `false` if it was not a member
    async fn remove_track_from_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<bool>;
}
