/// Background scan job tests
/// Single-flight bookkeeping must survive failing and panicking scans
mod common;

use async_trait::async_trait;
use common::GateExtractor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tingting_core::{
    Album, AlbumId, Artist, ArtistId, AudioFormat, CatalogStore, CreatePlaylist, CreateTrack,
    Lyric, Page, Playlist, PlaylistId, PlaylistTrack, PlaylistWithTracks, Track, TrackId,
    TrackWithDetails,
};
use tingting_metadata::{
    DiskFs, LibraryFs, MemoryFs, MetadataExtractor, ReadSeek, ScanConfig, TrackMetadata,
};
use tingting_server::jobs::{ScanJobError, ScanJobs};
use tingting_storage::LocalCatalog;

type CoreResult<T> = tingting_core::Result<T>;

/// Catalog whose first scan call panics, like a driver bug would
struct PanickingCatalog;

#[async_trait]
impl CatalogStore for PanickingCatalog {
    async fn get_artists(&self, _page: Page) -> CoreResult<Vec<Artist>> {
        unreachable!()
    }
    async fn get_artist(&self, _id: ArtistId) -> CoreResult<Option<Artist>> {
        unreachable!()
    }
    async fn find_or_create_artist(&self, _name: &str) -> CoreResult<Artist> {
        unreachable!()
    }
    async fn get_albums(&self, _page: Page) -> CoreResult<Vec<Album>> {
        unreachable!()
    }
    async fn get_album(&self, _id: AlbumId) -> CoreResult<Option<Album>> {
        unreachable!()
    }
    async fn find_album(
        &self,
        _title: &str,
        _artist_id: Option<ArtistId>,
    ) -> CoreResult<Option<Album>> {
        unreachable!()
    }
    async fn create_album(&self, _title: &str, _artist_id: Option<ArtistId>) -> CoreResult<Album> {
        unreachable!()
    }
    async fn get_tracks(&self, _page: Page) -> CoreResult<Vec<Track>> {
        unreachable!()
    }
    async fn get_track(&self, _id: TrackId) -> CoreResult<Option<Track>> {
        unreachable!()
    }
    async fn find_track_by_path(&self, path: &str) -> CoreResult<Option<Track>> {
        panic!("connection poisoned while looking up {path}")
    }
    async fn create_track(&self, _track: CreateTrack) -> CoreResult<Track> {
        unreachable!()
    }
    async fn delete_track(&self, _id: TrackId) -> CoreResult<bool> {
        unreachable!()
    }
    async fn get_track_with_details(&self, _id: TrackId) -> CoreResult<Option<TrackWithDetails>> {
        unreachable!()
    }
    async fn get_tracks_with_details(&self, _page: Page) -> CoreResult<Vec<TrackWithDetails>> {
        unreachable!()
    }
    async fn get_lyric(&self, _track_id: TrackId) -> CoreResult<Option<Lyric>> {
        unreachable!()
    }
    async fn upsert_lyric(&self, _track_id: TrackId, _content: &str) -> CoreResult<Lyric> {
        unreachable!()
    }
    async fn delete_lyric(&self, _track_id: TrackId) -> CoreResult<bool> {
        unreachable!()
    }
    async fn get_playlists(&self, _page: Page) -> CoreResult<Vec<Playlist>> {
        unreachable!()
    }
    async fn get_playlist(&self, _id: PlaylistId) -> CoreResult<Option<Playlist>> {
        unreachable!()
    }
    async fn get_playlist_with_tracks(
        &self,
        _id: PlaylistId,
    ) -> CoreResult<Option<PlaylistWithTracks>> {
        unreachable!()
    }
    async fn create_playlist(&self, _playlist: CreatePlaylist) -> CoreResult<Playlist> {
        unreachable!()
    }
    async fn update_playlist(&self, _id: PlaylistId, _name: &str) -> CoreResult<Option<Playlist>> {
        unreachable!()
    }
    async fn delete_playlist(&self, _id: PlaylistId) -> CoreResult<bool> {
        unreachable!()
    }
    async fn ensure_default_playlists(&self, _music_dir: &str) -> CoreResult<()> {
        unreachable!()
    }
    async fn add_track_to_playlist(
        &self,
        _playlist_id: PlaylistId,
        _track_id: TrackId,
        _order: i64,
    ) -> CoreResult<PlaylistTrack> {
        unreachable!()
    }
    async fn remove_track_from_playlist(
        &self,
        _playlist_id: PlaylistId,
        _track_id: TrackId,
    ) -> CoreResult<bool> {
        unreachable!()
    }
}

/// Panics on every file it is given
struct PanickingExtractor;

impl MetadataExtractor for PanickingExtractor {
    fn extract(
        &self,
        path: &Path,
        _format: AudioFormat,
        _reader: Box<dyn ReadSeek>,
    ) -> tingting_metadata::Result<TrackMetadata> {
        panic!("malformed header in {}", path.display())
    }
}

async fn test_catalog() -> (Arc<LocalCatalog>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
    let pool = tingting_storage::create_pool(&db_url)
        .await
        .expect("Failed to create pool");
    tingting_storage::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    (Arc::new(LocalCatalog::new(pool)), temp_dir)
}

fn bad_library() -> Arc<dyn LibraryFs> {
    Arc::new(MemoryFs::new().with_file("/music/bad.mp3", "not audio"))
}

#[tokio::test]
async fn test_panicking_scan_releases_its_root() {
    let jobs = Arc::new(ScanJobs::new(
        Arc::new(PanickingCatalog),
        bad_library(),
        Arc::new(PanickingExtractor),
        ScanConfig::default(),
    ));
    let root = PathBuf::from("/music");

    let stats = jobs.submit(root.clone()).await.unwrap().await.unwrap();

    assert_eq!(stats.errors.len(), 1);
    assert!(stats.errors[0].1.contains("panic"));
    assert!(!jobs.is_running(&root).await);

    let status = jobs.status().await;
    assert!(status.running.is_empty());
    assert_eq!(status.last.len(), 1);
    assert_eq!(status.last[0].stats.errors.len(), 1);

    // The root can be scanned again
    let again = jobs.submit(root.clone()).await;
    assert!(again.is_ok());
    again.unwrap().await.unwrap();
}

#[tokio::test]
async fn test_extractor_panic_is_recorded_per_file() {
    let (catalog, _temp_dir) = test_catalog().await;
    let jobs = Arc::new(ScanJobs::new(
        catalog.clone(),
        bad_library(),
        Arc::new(PanickingExtractor),
        ScanConfig::default(),
    ));
    let root = PathBuf::from("/music");

    let stats = jobs.submit(root.clone()).await.unwrap().await.unwrap();

    assert_eq!(stats.files_scanned, 1);
    assert_eq!(stats.tracks_added, 0);
    assert_eq!(stats.errors.len(), 1);
    assert_eq!(stats.errors[0].0, PathBuf::from("/music/bad.mp3"));
    assert!(!jobs.is_running(&root).await);
    assert!(catalog.get_tracks(Page::default()).await.unwrap().is_empty());

    let again = jobs.submit(root).await.unwrap().await.unwrap();
    assert_eq!(again.errors.len(), 1);
}

#[tokio::test]
async fn test_alternate_spellings_of_a_root_share_one_scan() {
    let (catalog, temp_dir) = test_catalog().await;
    let music = temp_dir.path().join("musics");
    std::fs::create_dir_all(music.join("sub")).unwrap();
    std::fs::write(music.join("held.mp3"), b"x").unwrap();

    let (release, gate) = GateExtractor::new();
    let jobs = Arc::new(ScanJobs::new(
        catalog,
        Arc::new(DiskFs),
        Arc::new(gate),
        ScanConfig::default(),
    ));

    let first = jobs.submit(music.clone()).await.unwrap();

    let respelled = music.join("sub").join("..");
    match jobs.submit(respelled.clone()).await {
        Err(ScanJobError::AlreadyRunning(root)) => {
            assert_eq!(root, std::fs::canonicalize(&music).unwrap());
        }
        Ok(_) => panic!("second scan of the same directory was accepted"),
    }
    assert!(jobs.is_running(&respelled).await);

    release.send(()).unwrap();
    first.await.unwrap();
    assert!(!jobs.is_running(&music).await);
}
