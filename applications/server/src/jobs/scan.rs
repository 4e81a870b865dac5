/// Background library scans
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tingting_core::CatalogStore;
use tingting_metadata::{LibraryFs, LibraryScanner, MetadataExtractor, ScanConfig, ScanStats};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum ScanJobError {
    #[error("A scan of {} is already running", .0.display())]
    AlreadyRunning(PathBuf),
}

/// Last finished scan of one root
#[derive(Debug, Clone, Serialize)]
pub struct RootStats {
    pub root: PathBuf,
    pub stats: ScanStats,
}

/// Snapshot for the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ScanStatus {
    pub running: Vec<PathBuf>,
    pub last: Vec<RootStats>,
}

/// Runs library scans as tokio tasks, at most one per root
pub struct ScanJobs {
    db: Arc<dyn CatalogStore>,
    fs: Arc<dyn LibraryFs>,
    extractor: Arc<dyn MetadataExtractor>,
    config: ScanConfig,
    running: Mutex<HashMap<PathBuf, CancellationToken>>,
    last: Mutex<HashMap<PathBuf, ScanStats>>,
}

/// Absolute form of `root`; a root that can't be resolved is kept as given
/// and its scan reports the error
async fn canonical_root(root: PathBuf) -> PathBuf {
    tokio::fs::canonicalize(&root).await.unwrap_or(root)
}

impl ScanJobs {
    pub fn new(
        db: Arc<dyn CatalogStore>,
        fs: Arc<dyn LibraryFs>,
        extractor: Arc<dyn MetadataExtractor>,
        config: ScanConfig,
    ) -> Self {
        Self {
            db,
            fs,
            extractor,
            config,
            running: Mutex::new(HashMap::new()),
            last: Mutex::new(HashMap::new()),
        }
    }

    /// Start a scan of `root` in the background
    ///
    /// Fails with [`ScanJobError::AlreadyRunning`] while an earlier scan of
    /// the same root is still going. Roots are compared after
    /// canonicalization, so `./musics` and its absolute path are one root.
    pub async fn submit(
        self: &Arc<Self>,
        root: PathBuf,
    ) -> Result<JoinHandle<ScanStats>, ScanJobError> {
        let root = canonical_root(root).await;
        let token = CancellationToken::new();

        {
            let mut running = self.running.lock().await;
            if running.contains_key(&root) {
                return Err(ScanJobError::AlreadyRunning(root));
            }
            running.insert(root.clone(), token.clone());
        }

        tracing::info!("Queued scan of {}", root.display());

        let jobs = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let scanner = LibraryScanner::new(
                Arc::clone(&jobs.db),
                Arc::clone(&jobs.fs),
                Arc::clone(&jobs.extractor),
            )
            .with_config(jobs.config.clone())
            .with_cancellation(token);

            let scan_root = root.clone();
            let result = tokio::spawn(async move { scanner.scan(&scan_root, None).await }).await;

            let stats = match result {
                Ok(stats) => stats,
                Err(e) => {
                    tracing::error!("Scan of {} panicked: {}", root.display(), e);
                    ScanStats {
                        errors: vec![(root.clone(), format!("Task panic: {e}"))],
                        ..ScanStats::default()
                    }
                }
            };

            jobs.last.lock().await.insert(root.clone(), stats.clone());
            jobs.running.lock().await.remove(&root);

            stats
        });

        Ok(handle)
    }

    pub async fn is_running(&self, root: &Path) -> bool {
        let root = canonical_root(root.to_path_buf()).await;
        self.running.lock().await.contains_key(&root)
    }

    pub async fn cancel_all(&self) {
        for (root, token) in self.running.lock().await.iter() {
            tracing::info!("Cancelling scan of {}", root.display());
            token.cancel();
        }
    }

    pub async fn status(&self) -> ScanStatus {
        let mut running: Vec<PathBuf> = self.running.lock().await.keys().cloned().collect();
        running.sort();

        let mut last: Vec<RootStats> = self
            .last
            .lock()
            .await
            .iter()
            .map(|(root, stats)| RootStats {
                root: root.clone(),
                stats: stats.clone(),
            })
            .collect();
        last.sort_by(|a, b| a.root.cmp(&b.root));

        ScanStatus { running, last }
    }
}
