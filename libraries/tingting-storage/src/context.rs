use crate::{albums, artists, lyrics, playlists, tracks};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tingting_core::{error::Result, storage::CatalogStore, types::*};

/// Catalog backed by a local `SQLite` database
#[derive(Clone)]
pub struct LocalCatalog {
    pool: SqlitePool,
}

impl LocalCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for LocalCatalog {
    // Artists
    async fn get_artists(&self, page: Page) -> Result<Vec<Artist>> {
        artists::get_all(&self.pool, page).await
    }

    async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
        artists::get_by_id(&self.pool, id).await
    }

    async fn find_or_create_artist(&self, name: &str) -> Result<Artist> {
        artists::find_or_create(&self.pool, name).await
    }

    // Albums
    async fn get_albums(&self, page: Page) -> Result<Vec<Album>> {
        albums::get_all(&self.pool, page).await
    }

    async fn get_album(&self, id: AlbumId) -> Result<Option<Album>> {
        albums::get_by_id(&self.pool, id).await
    }

    async fn find_album(&self, title: &str, artist_id: Option<ArtistId>) -> Result<Option<Album>> {
        albums::find(&self.pool, title, artist_id).await
    }

    async fn create_album(&self, title: &str, artist_id: Option<ArtistId>) -> Result<Album> {
        albums::create(&self.pool, title, artist_id).await
    }

    // Tracks
    async fn get_tracks(&self, page: Page) -> Result<Vec<Track>> {
        tracks::get_all(&self.pool, page).await
    }

    async fn get_track(&self, id: TrackId) -> Result<Option<Track>> {
        tracks::get_by_id(&self.pool, id).await
    }

    async fn find_track_by_path(&self, path: &str) -> Result<Option<Track>> {
        tracks::find_by_path(&self.pool, path).await
    }

    async fn create_track(&self, track: CreateTrack) -> Result<Track> {
        tracks::create(&self.pool, track).await
    }

    async fn delete_track(&self, id: TrackId) -> Result<bool> {
        tracks::delete(&self.pool, id).await
    }

    async fn get_track_with_details(&self, id: TrackId) -> Result<Option<TrackWithDetails>> {
        tracks::get_with_details(&self.pool, id).await
    }

    async fn get_tracks_with_details(&self, page: Page) -> Result<Vec<TrackWithDetails>> {
        tracks::get_all_with_details(&self.pool, page).await
    }

    // Lyrics
    async fn get_lyric(&self, track_id: TrackId) -> Result<Option<Lyric>> {
        lyrics::get_by_track(&self.pool, track_id).await
    }

    async fn upsert_lyric(&self, track_id: TrackId, content: &str) -> Result<Lyric> {
        lyrics::upsert(&self.pool, track_id, content).await
    }

    async fn delete_lyric(&self, track_id: TrackId) -> Result<bool> {
        lyrics::delete(&self.pool, track_id).await
    }

    // Playlists
    async fn get_playlists(&self, page: Page) -> Result<Vec<Playlist>> {
        playlists::get_all(&self.pool, page).await
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<Playlist>> {
        playlists::get_by_id(&self.pool, id).await
    }

    async fn get_playlist_with_tracks(&self, id: PlaylistId) -> Result<Option<PlaylistWithTracks>> {
        playlists::get_with_tracks(&self.pool, id).await
    }

    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist> {
        playlists::create(&self.pool, playlist).await
    }

    async fn update_playlist(&self, id: PlaylistId, name: &str) -> Result<Option<Playlist>> {
        playlists::update(&self.pool, id, name).await
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool> {
        playlists::delete(&self.pool, id).await
    }

    async fn ensure_default_playlists(&self, music_dir: &str) -> Result<()> {
        playlists::ensure_defaults(&self.pool, music_dir).await
    }

    async fn add_track_to_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
        order: i64,
    ) -> Result<PlaylistTrack> {
        playlists::add_track(&self.pool, playlist_id, track_id, order).await
    }

    async fn remove_track_from_playlist(
        &self,
        playlist_id: PlaylistId,
        track_id: TrackId,
    ) -> Result<bool> {
        playlists::remove_track(&self.pool, playlist_id, track_id).await
    }
}
