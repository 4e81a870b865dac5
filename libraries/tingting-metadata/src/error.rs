/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Sidecar file is not valid UTF-8
    #[error("Invalid UTF-8 in {0}")]
    InvalidText(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Directory walk error
    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),

    /// Blocking file work panicked or was aborted
    #[error("Blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Catalog write failed
    #[error(transparent)]
    Catalog(#[from] tingting_core::TingError),
}

impl From<MetadataError> for tingting_core::TingError {
    fn from(err: MetadataError) -> Self {
        match err {
            MetadataError::Catalog(inner) => inner,
            MetadataError::Io(io) => tingting_core::TingError::Io(io),
            other => tingting_core::TingError::metadata(other.to_string()),
        }
    }
}
