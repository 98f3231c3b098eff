//! Round-trip tests: generate an archive, then traverse what was written.

use coffer::generate::{GenerationSpec, Generator, LOCAL_DOCS};
use coffer::store::{CompoundStore, ContainerStore};
use coffer::traverse::{aggregate, TraverseConfig};
use std::path::PathBuf;
use tempfile::TempDir;

fn generate_archive(parts: u64) -> (PathBuf, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.coffer");
    let mut store = CompoundStore::new();
    Generator::new(GenerationSpec::new(parts))
        .generate(&mut store, &path)
        .unwrap();
    (path, dir)
}

/// Aggregating a generated tree must reproduce the generation arithmetic:
/// containers = 15N + 2, streams = 15N, bytes = 15N * 15360.
#[test]
fn test_generate_then_aggregate_counts_match() {
    let (path, _dir) = generate_archive(3);

    let mut store = CompoundStore::new();
    let root = store.open_root(&path, true).unwrap();
    let report = aggregate(&mut store, root, &TraverseConfig::default());
    store.close(root);

    assert!(report.succeeded());
    assert_eq!(report.containers, 3 * 15 + 2);
    assert_eq!(report.streams, 3 * 15);
    assert_eq!(report.stream_bytes, 3 * 15 * 15360);
    assert_eq!(report.lockbytes, 0);
    assert_eq!(report.properties, 0);
}

/// Zero parts still produces the root and the index container.
#[test]
fn test_zero_part_generation() {
    let (path, _dir) = generate_archive(0);

    let mut store = CompoundStore::new();
    let root = store.open_root(&path, true).unwrap();
    let report = aggregate(&mut store, root, &TraverseConfig::default());
    store.close(root);

    assert!(report.succeeded());
    assert_eq!(report.containers, 2);
    assert_eq!(report.streams, 0);
    assert_eq!(report.stream_bytes, 0);
}

/// The archive persists: a second process (fresh store) sees the same tree.
#[test]
fn test_generated_archive_survives_reopen() {
    let (path, _dir) = generate_archive(1);

    let mut store = CompoundStore::new();
    let root = store.open_root(&path, true).unwrap();
    let docs = store.open_child_container(root, LOCAL_DOCS).unwrap();
    let part = store.open_child_container(docs, "PART_0").unwrap();
    let sub = store.open_child_container(part, "PStg_0").unwrap();
    let stream = store.open_child_stream(sub, "PStg_0_Stream").unwrap();

    let stat = store.stat(stream).unwrap();
    assert_eq!(stat.size, 15360);

    store.close(stream);
    store.close(sub);
    store.close(part);
    store.close(docs);
    store.close(root);
}

/// Generating over an existing archive replaces it.
#[test]
fn test_regeneration_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rewrite.coffer");

    let mut store = CompoundStore::new();
    Generator::new(GenerationSpec::new(2))
        .generate(&mut store, &path)
        .unwrap();

    let mut store = CompoundStore::new();
    Generator::new(GenerationSpec::new(1))
        .generate(&mut store, &path)
        .unwrap();

    let mut store = CompoundStore::new();
    let root = store.open_root(&path, true).unwrap();
    let report = aggregate(&mut store, root, &TraverseConfig::default());
    store.close(root);
    assert_eq!(report.containers, 17);
}
