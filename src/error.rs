// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or replacing the marker document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Body rejected by strict mode. Never produced for verbatim saves.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

pub type StoreResult<T> = core::result::Result<T, StoreError>;
