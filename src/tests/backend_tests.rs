// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::backend::{FileBackend, MarkerBackend, MemoryBackend};
use crate::error::StoreError;
use tempfile::tempdir;

#[test]
fn test_file_backend_missing_file_reads_none() {
    let dir = tempdir().unwrap();
    let backend = FileBackend::new(dir.path().join("markers.json"));
    assert!(backend.read().unwrap().is_none());
}

#[test]
fn test_file_backend_overwrites_whole_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("markers.json");
    let backend = FileBackend::new(&path);

    backend.write(b"{\"long\": [1, 2, 3, 4, 5, 6, 7, 8]}").unwrap();
    backend.write(b"{}").unwrap();

    // Shorter second write must not leave a tail of the first
    assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    assert_eq!(backend.read().unwrap().unwrap(), b"{}");
}

#[test]
fn test_file_backend_leaves_no_temp_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("markers.json");
    let backend = FileBackend::new(&path);

    backend.write(b"{}").unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["markers.json".to_string()]);
}

#[test]
fn test_concurrent_writers_publish_whole_documents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("markers.json");

    // Distinct sizes so a mix of two writes cannot pass for either one
    let docs: Vec<Vec<u8>> = (0..8)
        .map(|i| format!("{{\"w{}\": \"{}\"}}", i, "x".repeat(4096 * (i + 1))).into_bytes())
        .collect();

    std::thread::scope(|scope| {
        for doc in &docs {
            let backend = FileBackend::new(&path);
            scope.spawn(move || {
                for _ in 0..20 {
                    backend.write(doc).unwrap();
                }
            });
        }
    });

    let stored = std::fs::read(&path).unwrap();
    assert!(docs.contains(&stored), "stored document is a mix of writers");

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["markers.json".to_string()]);
}

#[test]
fn test_file_backend_write_failure_is_io_error() {
    let dir = tempdir().unwrap();
    let backend = FileBackend::new(dir.path().join("no_such_dir").join("markers.json"));

    match backend.write(b"{}") {
        Err(StoreError::Io(_)) => (),
        other => panic!("Expected Io error, got {:?}", other),
    }
    assert!(backend.read().unwrap().is_none());
}

#[test]
fn test_file_backend_read_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let backend = FileBackend::new(dir.path());
    assert!(matches!(backend.read(), Err(StoreError::Io(_))));
}

#[test]
fn test_memory_backend() {
    let backend = MemoryBackend::new();
    assert!(backend.read().unwrap().is_none());

    backend.write(b"abc").unwrap();
    assert_eq!(backend.read().unwrap().unwrap(), b"abc");
    assert_eq!(backend.location(), "memory");

    let seeded = MemoryBackend::with_document("{}");
    assert_eq!(seeded.read().unwrap().unwrap(), b"{}");
}

#[test]
fn test_boxed_backend_delegates() {
    let backend: Box<dyn MarkerBackend> = Box::new(MemoryBackend::new());
    backend.write(b"[1]").unwrap();
    assert_eq!(backend.read().unwrap().unwrap(), b"[1]");
}
