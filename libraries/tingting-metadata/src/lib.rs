//! TingTing Music Metadata
//!
//! Metadata extraction and library scanning for TingTing Music.
//!
//! This crate provides:
//! - A library filesystem abstraction (`DiskFs` on disk, `MemoryFs` for tests)
//! - Tag and stream-info extraction through lofty, dispatched per tag family
//! - Matching of `.lrc` sidecar files to audio files by stem
//! - A two-pass, cancellable library scanner with progress reporting
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use tingting_metadata::{DiskFs, LibraryScanner, LoftyExtractor};
//! use tingting_storage::{create_pool, run_migrations, LocalCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://music.db").await?;
//! run_migrations(&pool).await?;
//!
//! let scanner = LibraryScanner::new(
//!     Arc::new(LocalCatalog::new(pool)),
//!     Arc::new(DiskFs),
//!     Arc::new(LoftyExtractor::new()),
//! );
//! let stats = scanner.scan(Path::new("./musics"), None).await;
//! println!("added {} tracks", stats.tracks_added);
//! # Ok(())
//! # }
//! ```

mod error;
mod extractor;
mod fs;
pub mod lyrics;
mod scanner;
pub mod tags;

pub use error::{MetadataError, Result};
pub use extractor::{LoftyExtractor, MetadataExtractor, TrackMetadata};
pub use fs::{DiskFs, LibraryFs, MemoryFs, ReadSeek};
pub use lyrics::find_audio_for_lyric;
pub use scanner::{LibraryScanner, ScanConfig, ScanProgress, ScanStats};
