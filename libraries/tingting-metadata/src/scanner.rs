/// Library scanner implementation
use crate::error::{MetadataError, Result};
use crate::extractor::MetadataExtractor;
use crate::fs::LibraryFs;
use crate::lyrics::{find_audio_for_lyric, is_lyric_file};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tingting_core::{AudioFormat, CatalogStore, CreateTrack};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Walk entries buffered ahead of the catalog writes
const WALK_BUFFER: usize = 64;

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Reuse an existing album with the same title and artist (default: true)
    ///
    /// When `false` every newly added track with an album tag gets its own
    /// album row.
    pub dedupe_albums: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            dedupe_albums: true,
        }
    }
}

/// Scan progress updates
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// Scanning started
    Started { root: PathBuf },

    /// Audio file processed
    FileScanned {
        path: PathBuf,
        success: bool,
        error: Option<String>,
    },

    /// Scanning completed
    Completed { stats: ScanStats },
}

/// Scan statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    /// Number of audio files discovered
    pub files_discovered: usize,

    /// Number of audio files processed
    pub files_scanned: usize,

    /// Number of tracks added to the catalog
    pub tracks_added: usize,

    /// Number of tracks skipped (path already in the catalog)
    pub tracks_skipped: usize,

    /// Number of lyric files attached to a track
    pub lyrics_matched: usize,

    /// The scan stopped early on cancellation
    pub cancelled: bool,

    /// Errors encountered
    pub errors: Vec<(PathBuf, String)>,
}

/// Library scanner
///
/// Walks a library twice: audio files first, then `.lrc` sidecars, so every
/// lyric can find a track added in the same scan.
pub struct LibraryScanner<S: CatalogStore + ?Sized> {
    db: Arc<S>,
    fs: Arc<dyn LibraryFs>,
    extractor: Arc<dyn MetadataExtractor>,
    config: ScanConfig,
    cancel: CancellationToken,
}

impl<S: CatalogStore + ?Sized> LibraryScanner<S> {
    /// Create a new library scanner
    pub fn new(db: Arc<S>, fs: Arc<dyn LibraryFs>, extractor: Arc<dyn MetadataExtractor>) -> Self {
        Self {
            db,
            fs,
            extractor,
            config: ScanConfig::default(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Stop between files once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Scan a directory into the catalog
    ///
    /// Never fails as a whole: per-file errors are logged and collected in
    /// [`ScanStats::errors`].
    ///
    /// # Arguments
    /// * `root` - Directory to scan
    /// * `progress_tx` - Optional channel for progress updates
    pub async fn scan(
        &self,
        root: &Path,
        progress_tx: Option<mpsc::Sender<ScanProgress>>,
    ) -> ScanStats {
        let mut stats = ScanStats::default();

        tracing::info!("Scanning library at {}", root.display());

        if let Some(ref tx) = progress_tx {
            let _ = tx
                .send(ScanProgress::Started {
                    root: root.to_path_buf(),
                })
                .await;
        }

        self.scan_audio(root, &mut stats, progress_tx.as_ref()).await;

        if !stats.cancelled {
            self.scan_lyrics(root, &mut stats).await;
        }

        if stats.cancelled {
            tracing::info!("Scan of {} cancelled", root.display());
        }

        tracing::info!(
            "Scan of {} finished: {} added, {} skipped, {} lyrics, {} errors",
            root.display(),
            stats.tracks_added,
            stats.tracks_skipped,
            stats.lyrics_matched,
            stats.errors.len()
        );

        if let Some(ref tx) = progress_tx {
            let _ = tx
                .send(ScanProgress::Completed {
                    stats: stats.clone(),
                })
                .await;
        }

        stats
    }

    async fn scan_audio(
        &self,
        root: &Path,
        stats: &mut ScanStats,
        progress_tx: Option<&mpsc::Sender<ScanProgress>>,
    ) {
        let mut entries = self.walk(root);
        while let Some(entry) = entries.recv().await {
            if self.cancel.is_cancelled() {
                stats.cancelled = true;
                return;
            }

            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("Failed to walk {}: {}", root.display(), e);
                    stats.errors.push((root.to_path_buf(), e.to_string()));
                    continue;
                }
            };

            let Some(format) = AudioFormat::scannable_from_path(&path) else {
                continue;
            };

            stats.files_discovered += 1;
            let result = self.process_audio(&path, format).await;
            stats.files_scanned += 1;

            let error = match result {
                Ok(true) => {
                    stats.tracks_added += 1;
                    None
                }
                Ok(false) => {
                    stats.tracks_skipped += 1;
                    None
                }
                Err(e) => {
                    tracing::warn!("Error processing file {}: {}", path.display(), e);
                    stats.errors.push((path.clone(), e.to_string()));
                    Some(e.to_string())
                }
            };

            if let Some(tx) = progress_tx {
                let _ = tx
                    .send(ScanProgress::FileScanned {
                        path,
                        success: error.is_none(),
                        error,
                    })
                    .await;
            }
        }
    }

    async fn scan_lyrics(&self, root: &Path, stats: &mut ScanStats) {
        let mut entries = self.walk(root);
        while let Some(entry) = entries.recv().await {
            if self.cancel.is_cancelled() {
                stats.cancelled = true;
                return;
            }

            // Walk errors were already recorded by the audio pass
            let Ok(path) = entry else {
                continue;
            };

            if !is_lyric_file(&path) {
                continue;
            }

            match self.process_lyric(&path).await {
                Ok(true) => stats.lyrics_matched += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Error processing lyric file {}: {}", path.display(), e);
                    stats.errors.push((path, e.to_string()));
                }
            }
        }
    }

    /// Walk `root` on the blocking pool
    ///
    /// The walker stops once the receiver is dropped.
    fn walk(&self, root: &Path) -> mpsc::Receiver<Result<PathBuf>> {
        let (tx, rx) = mpsc::channel(WALK_BUFFER);
        let fs = Arc::clone(&self.fs);
        let root = root.to_path_buf();

        tokio::task::spawn_blocking(move || {
            for entry in fs.walk(&root) {
                if tx.blocking_send(entry).is_err() {
                    break;
                }
            }
        });

        rx
    }

    /// Add one audio file to the catalog
    ///
    /// Returns: Ok(true) if added, Ok(false) if its path is already known
    async fn process_audio(&self, path: &Path, format: AudioFormat) -> Result<bool> {
        let file_path = path.to_string_lossy();

        if self.db.find_track_by_path(&file_path).await?.is_some() {
            return Ok(false);
        }

        let fs = Arc::clone(&self.fs);
        let extractor = Arc::clone(&self.extractor);
        let owned_path = path.to_path_buf();
        let metadata = tokio::task::spawn_blocking(move || {
            let reader = fs.open(&owned_path)?;
            extractor.extract(&owned_path, format, reader)
        })
        .await??;

        let artist_id = if metadata.artist.is_empty() {
            None
        } else {
            Some(self.db.find_or_create_artist(&metadata.artist).await?.id)
        };

        let album_id = if metadata.album.is_empty() {
            None
        } else {
            let existing = if self.config.dedupe_albums {
                self.db.find_album(&metadata.album, artist_id).await?
            } else {
                None
            };

            match existing {
                Some(album) => Some(album.id),
                None => Some(self.db.create_album(&metadata.album, artist_id).await?.id),
            }
        };

        let file_type = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let track = self
            .db
            .create_track(CreateTrack {
                title: metadata.title,
                artist_id,
                album_id,
                file_path: file_path.into_owned(),
                file_type,
                duration: metadata.duration_seconds,
                bitrate: metadata.bitrate,
                sample_rate: metadata.sample_rate,
            })
            .await?;

        tracing::debug!("Added track {} ({})", track.title, track.file_path);

        Ok(true)
    }

    /// Attach a lyric file to its track
    ///
    /// Returns: Ok(false) when no audio file or no track matches
    async fn process_lyric(&self, path: &Path) -> Result<bool> {
        let fs = Arc::clone(&self.fs);
        let lyric_path = path.to_path_buf();
        let (content, audio_path) = tokio::task::spawn_blocking(move || {
            let content = fs.read_to_string(&lyric_path)?;
            Ok::<_, MetadataError>((content, find_audio_for_lyric(fs.as_ref(), &lyric_path)))
        })
        .await??;

        let Some(audio_path) = audio_path else {
            return Ok(false);
        };

        let Some(track) = self
            .db
            .find_track_by_path(&audio_path.to_string_lossy())
            .await?
        else {
            return Ok(false);
        };

        self.db.upsert_lyric(track.id, &content).await?;
        tracing::debug!("Added lyric for track {}", track.title);

        Ok(true)
    }
}
