// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Byte-level storage for the marker document.

use crate::error::StoreResult;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Where the marker document lives. Implementations only move bytes; they
/// never look inside the document.
pub trait MarkerBackend: Send + Sync {
    /// Current document, or `None` if nothing was saved yet.
    fn read(&self) -> StoreResult<Option<Vec<u8>>>;

    /// Replaces the whole document.
    fn write(&self, bytes: &[u8]) -> StoreResult<()>;

    /// Human-readable location for logs.
    fn location(&self) -> String;
}

/// A single JSON file on disk.
///
/// Writes go to a uniquely named temporary file next to the target, are
/// synced, and then renamed over it, so a crash or a concurrent writer leaves
/// either one complete document or another.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that receives the temporary file; the rename must not cross
    /// filesystems.
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl MarkerBackend for FileBackend {
    fn read(&self) -> StoreResult<Option<Vec<u8>>> {
        match std::fs::read(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, bytes: &[u8]) -> StoreResult<()> {
        // Unique name per writer; dropped (and removed) if anything fails
        let mut tmp = NamedTempFile::new_in(self.parent_dir())?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!("Wrote {} bytes to {:?}", bytes.len(), self.path);
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keeps the document in memory. Used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    doc: Mutex<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(bytes: impl Into<Vec<u8>>) -> Self {
        Self { doc: Mutex::new(Some(bytes.into())) }
    }
}

impl MarkerBackend for MemoryBackend {
    fn read(&self) -> StoreResult<Option<Vec<u8>>> {
        let doc = self.doc.lock().unwrap_or_else(|e| e.into_inner());
        Ok(doc.clone())
    }

    fn write(&self, bytes: &[u8]) -> StoreResult<()> {
        let mut doc = self.doc.lock().unwrap_or_else(|e| e.into_inner());
        *doc = Some(bytes.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

impl<B: MarkerBackend + ?Sized> MarkerBackend for Box<B> {
    fn read(&self) -> StoreResult<Option<Vec<u8>>> {
        (**self).read()
    }

    fn write(&self, bytes: &[u8]) -> StoreResult<()> {
        (**self).write(bytes)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
