//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, Mutex};
use tempfile::TempDir;
use tingting_core::{AudioFormat, CatalogStore, CreateTrack, Track};
use tingting_metadata::{
    DiskFs, MetadataError, MetadataExtractor, ReadSeek, ScanConfig, TrackMetadata,
};
use tingting_server::{config::ServerConfig, create_router, jobs::ScanJobs, state::AppState};
use tingting_storage::LocalCatalog;
use tower::util::ServiceExt;

/// Router over a real SQLite catalog and a temporary music root
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub db: Arc<LocalCatalog>,
    pub music_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(customize: impl FnOnce(&mut ServerConfig)) -> Self {
        Self::build(customize, None).await
    }

    /// Scans go through `extractor` instead of lofty
    pub async fn with_extractor(extractor: Arc<dyn MetadataExtractor>) -> Self {
        Self::build(|_| {}, Some(extractor)).await
    }

    async fn build(
        customize: impl FnOnce(&mut ServerConfig),
        extractor: Option<Arc<dyn MetadataExtractor>>,
    ) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let music_dir = temp_dir.path().join("musics");
        std::fs::create_dir_all(&music_dir).expect("Failed to create music dir");

        let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
        let pool = tingting_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        tingting_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let db = Arc::new(LocalCatalog::new(pool));

        let mut config = ServerConfig::default();
        config.storage.database_url = db_url;
        config.library.music_dir = music_dir.clone();
        config.library.scan_on_startup = false;
        customize(&mut config);

        db.ensure_default_playlists(&music_dir.to_string_lossy())
            .await
            .expect("Failed to create default playlists");

        let state = match extractor {
            Some(extractor) => {
                let scan_jobs = ScanJobs::new(
                    db.clone(),
                    Arc::new(DiskFs),
                    extractor,
                    ScanConfig::default(),
                );
                AppState::with_scan_jobs(db.clone(), config, scan_jobs)
            }
            None => AppState::new(db.clone(), config),
        };
        let router = create_router(state.clone());

        Self {
            router,
            state,
            db,
            music_dir,
            _temp_dir: temp_dir,
        }
    }

    /// Send a request and return status, headers and raw body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, body.to_vec())
    }

    /// Send a request and parse the body as JSON
    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let (status, _, bytes) = self.send(request).await;
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.json(Method::GET, uri, None).await
    }

    /// Write `contents` under the music root and catalog it as a track
    pub async fn add_track_file(&self, name: &str, contents: &[u8]) -> Track {
        let path = self.music_dir.join(name);
        std::fs::write(&path, contents).expect("Failed to write track file");

        let file_type = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        self.db
            .create_track(CreateTrack {
                title: name.to_string(),
                artist_id: None,
                album_id: None,
                file_path: path.to_string_lossy().into_owned(),
                file_type,
                duration: 1.0,
                bitrate: None,
                sample_rate: None,
            })
            .await
            .expect("Failed to create track")
    }
}

/// Minimal PCM WAV: 16-bit mono silence
pub fn wav_bytes(sample_rate: u32, seconds: u32) -> Vec<u8> {
    let block_align: u16 = 2;
    let byte_rate = sample_rate * u32::from(block_align);
    let data_len = byte_rate * seconds;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);
    bytes
}

/// Holds every extraction until the paired sender fires or is dropped
pub struct GateExtractor {
    release: Mutex<mpsc::Receiver<()>>,
}

impl GateExtractor {
    pub fn new() -> (mpsc::Sender<()>, Self) {
        let (tx, rx) = mpsc::channel();
        (
            tx,
            Self {
                release: Mutex::new(rx),
            },
        )
    }
}

impl MetadataExtractor for GateExtractor {
    fn extract(
        &self,
        path: &Path,
        _format: AudioFormat,
        _reader: Box<dyn ReadSeek>,
    ) -> tingting_metadata::Result<TrackMetadata> {
        let _ = self.release.lock().unwrap().recv();
        Err(MetadataError::UnsupportedFormat(path.display().to_string()))
    }
}
