/// Shared application state
use crate::config::ServerConfig;
use crate::jobs::ScanJobs;
use std::sync::Arc;
use tingting_core::CatalogStore;
use tingting_metadata::{DiskFs, LoftyExtractor, ScanConfig};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn CatalogStore>,
    pub config: Arc<ServerConfig>,
    pub scan_jobs: Arc<ScanJobs>,
}

impl AppState {
    /// State over the real filesystem and the lofty extractor
    pub fn new(db: Arc<dyn CatalogStore>, config: ServerConfig) -> Self {
        let scan_jobs = ScanJobs::new(
            Arc::clone(&db),
            Arc::new(DiskFs),
            Arc::new(LoftyExtractor::new()),
            ScanConfig {
                dedupe_albums: config.library.dedupe_albums,
            },
        );

        Self::with_scan_jobs(db, config, scan_jobs)
    }

    pub fn with_scan_jobs(
        db: Arc<dyn CatalogStore>,
        config: ServerConfig,
        scan_jobs: ScanJobs,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            scan_jobs: Arc::new(scan_jobs),
        }
    }
}
