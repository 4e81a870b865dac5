//! Filesystem seen by the scanner and the lyric matcher
use crate::error::{MetadataError, Result};
use std::collections::BTreeMap;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

/// Readable, seekable byte source handed to the extractor
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// Read-only view of a music library
///
/// `walk` is lazy and yields regular files only, depth first, with siblings
/// sorted by file name so that repeated walks see the same order.
pub trait LibraryFs: Send + Sync {
    fn walk<'a>(&'a self, root: &Path) -> Box<dyn Iterator<Item = Result<PathBuf>> + Send + 'a>;

    /// `true` if `path` is an existing regular file
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    fn open(&self, path: &Path) -> Result<Box<dyn ReadSeek>>;
}

/// The real filesystem, walked with walkdir
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl LibraryFs for DiskFs {
    fn walk<'a>(&'a self, root: &Path) -> Box<dyn Iterator<Item = Result<PathBuf>> + Send + 'a> {
        let iter = walkdir::WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => Some(Err(MetadataError::from(e))),
            });

        Box::new(iter)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)?;
        String::from_utf8(bytes).map_err(|_| MetadataError::InvalidText(path.display().to_string()))
    }

    fn open(&self, path: &Path) -> Result<Box<dyn ReadSeek>> {
        let file = std::fs::File::open(path)?;
        Ok(Box::new(file))
    }
}

/// In-memory library keyed by path
///
/// Paths order component-wise, which gives the same sibling order as a
/// file-name sorted walk.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    fn get(&self, path: &Path) -> Result<&Vec<u8>> {
        self.files
            .get(path)
            .ok_or_else(|| MetadataError::FileNotFound(path.display().to_string()))
    }
}

impl LibraryFs for MemoryFs {
    fn walk<'a>(&'a self, root: &Path) -> Box<dyn Iterator<Item = Result<PathBuf>> + Send + 'a> {
        let root = root.to_path_buf();
        Box::new(
            self.files
                .keys()
                .filter(move |path| path.starts_with(&root))
                .map(|path| Ok(path.clone())),
        )
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self.get(path)?.clone();
        String::from_utf8(bytes).map_err(|_| MetadataError::InvalidText(path.display().to_string()))
    }

    fn open(&self, path: &Path) -> Result<Box<dyn ReadSeek>> {
        Ok(Box::new(Cursor::new(self.get(path)?.clone())))
    }
}
