// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! clipmark: labelled timestamps for local media files, persisted as a single
//! JSON document that is replaced wholesale on every save.

pub mod error;
pub mod marker;
pub mod backend;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use marker::{format_timestamp, Marker, MarkerStore};
pub use backend::{FileBackend, MarkerBackend, MemoryBackend};
pub use repository::{MarkerRepository, SaveMode, EMPTY_STORE};

#[cfg(test)]
pub mod tests;
