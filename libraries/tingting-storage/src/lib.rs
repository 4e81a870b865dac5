//! TingTing Music Storage
//!
//! `SQLite` catalog for TingTing Music: artists, albums, tracks, lyrics and
//! playlists.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each entity owns its own queries in its module
//! - **Idempotent writes**: Uniqueness lives in the schema (`UNIQUE` on artist
//!   name, track path and lyric track), so repeated scans converge
//! - **Per-entity commits**: No multi-entity transactions; an interrupted scan
//!   leaves a partial but consistent catalog
//!
//! # Example
//!
//! ```rust,no_run
//! use tingting_storage::{LocalCatalog, create_pool, run_migrations};
//! use tingting_core::{CatalogStore, Page};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://music.db").await?;
//! run_migrations(&pool).await?;
//!
//! let catalog = LocalCatalog::new(pool);
//! catalog.ensure_default_playlists("./musics").await?;
//! let tracks = catalog.get_tracks(Page::default()).await?;
//! # Ok(())
//! # }
//! ```

mod context;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod lyrics;
pub mod playlists;
pub mod tracks;

pub use context::LocalCatalog;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://music.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating catalog pool for {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
