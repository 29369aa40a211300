// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Marker data model.
//!
//! A [`MarkerStore`] maps a media file name to the markers placed in it. The
//! page keeps every list sorted by `time` before it saves, so the typed model
//! does the same when it edits. Identity is positional: a marker is addressed
//! by its index in the list of its file.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    /// Seconds from the start of the media.
    pub time: f64,
}

impl Marker {
    pub fn new(label: impl Into<String>, time: f64) -> Self {
        Self { label: label.into(), time }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_timestamp(self.time), self.label)
    }
}

/// Renders seconds as `MM:SS`, truncating fractions. Minutes are not wrapped
/// into hours. Negative input renders as `00:00`.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    let m = (seconds / 60.0).floor() as u64;
    let s = (seconds % 60.0).floor() as u64;
    format!("{:02}:{:02}", m, s)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerStore {
    files: BTreeMap<String, Vec<Marker>>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strict parse of a saved document.
    ///
    /// The top level must be an object whose values are arrays of
    /// `{label, time}` records. JSON has no NaN or infinity, and out-of-range
    /// numbers fail to parse, so every accepted `time` is finite.
    pub fn parse(bytes: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::InvalidPayload(e.to_string()))
    }

    pub fn to_json_vec(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StoreError::InvalidPayload(e.to_string()))
    }

    /// Markers of one media file, empty if the file has none.
    pub fn markers(&self, file: &str) -> &[Marker] {
        self.files.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Appends and re-sorts by time. Equal times keep insertion order.
    pub fn add(&mut self, file: impl Into<String>, marker: Marker) {
        let list = self.files.entry(file.into()).or_default();
        list.push(marker);
        list.sort_by(|a, b| a.time.total_cmp(&b.time));
    }

    /// Positional delete. The file key stays even when its list empties.
    pub fn remove(&mut self, file: &str, index: usize) -> Option<Marker> {
        let list = self.files.get_mut(file)?;
        if index < list.len() {
            Some(list.remove(index))
        } else {
            None
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn marker_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// True when every list is in ascending time order.
    pub fn is_ordered(&self) -> bool {
        self.files
            .values()
            .all(|list| list.windows(2).all(|w| w[0].time <= w[1].time))
    }
}
