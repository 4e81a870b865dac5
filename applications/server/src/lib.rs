//! TingTing Music Server Library
//!
//! Personal music library server: background library scans, a browsable
//! catalog, lyrics, playlists, cover art and audio streaming over HTTP.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod jobs;
pub mod router;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use jobs::ScanJobs;
pub use router::create_router;
pub use state::AppState;
