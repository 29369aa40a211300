// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Load/save contract over a [`MarkerBackend`].
//!
//! Saves are snapshot overwrites: the body replaces the whole document and
//! nothing is merged. Loads hand back the stored bytes untouched.

use crate::backend::MarkerBackend;
use crate::error::StoreResult;
use crate::marker::MarkerStore;

/// Returned by `load` while nothing has been saved.
pub const EMPTY_STORE: &[u8] = b"{}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    /// Persist whatever bytes arrive.
    #[default]
    Verbatim,
    /// Reject bodies that do not parse as a [`MarkerStore`].
    Validated,
}

pub struct MarkerRepository<B: MarkerBackend> {
    backend: B,
    mode: SaveMode,
}

impl<B: MarkerBackend> MarkerRepository<B> {
    pub fn new(backend: B, mode: SaveMode) -> Self {
        Self { backend, mode }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn mode(&self) -> SaveMode {
        self.mode
    }

    pub fn load(&self) -> StoreResult<Vec<u8>> {
        Ok(self.backend.read()?.unwrap_or_else(|| EMPTY_STORE.to_vec()))
    }

    /// Replaces the stored document with `body`. Returns the number of bytes
    /// written.
    pub fn save(&self, body: &[u8]) -> StoreResult<usize> {
        if self.mode == SaveMode::Validated {
            let store = MarkerStore::parse(body)?;
            if !store.is_ordered() {
                tracing::debug!("Saving marker lists that are not sorted by time");
            }
            tracing::debug!(
                "Validated {} markers across {} files",
                store.marker_count(),
                store.file_count()
            );
        }

        self.backend.write(body)?;
        Ok(body.len())
    }

    /// Typed view of the stored document, empty if nothing was saved.
    pub fn snapshot(&self) -> StoreResult<MarkerStore> {
        match self.backend.read()? {
            Some(bytes) => MarkerStore::parse(&bytes),
            None => Ok(MarkerStore::new()),
        }
    }
}
