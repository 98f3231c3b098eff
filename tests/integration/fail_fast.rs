//! Fail-fast traversal: counts freeze strictly before the failure point.

use crate::integration::support::DenyingStore;
use coffer::error::StoreError;
use coffer::generate::{GenerationSpec, Generator};
use coffer::store::{CompoundStore, ContainerStore};
use coffer::traverse::{aggregate, TraverseConfig};
use tempfile::TempDir;

#[test]
fn test_unopenable_container_aborts_traversal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deny.coffer");

    let mut store = CompoundStore::new();
    Generator::new(GenerationSpec::new(3))
        .generate(&mut store, &path)
        .unwrap();

    // PART_1 refuses to open; PART_0 is fully visited first, PART_2 never.
    let mut inner = CompoundStore::new();
    let root = inner.open_root(&path, true).unwrap();
    let mut store = DenyingStore::new(inner, "PART_1");

    let report = aggregate(&mut store, root, &TraverseConfig::default());

    assert!(matches!(report.failure, Some(StoreError::Open { .. })));
    // root + LocalDocs + PART_0 + its 15 sub-containers.
    assert_eq!(report.containers, 18);
    assert_eq!(report.streams, 15);
    assert_eq!(report.stream_bytes, 15 * 15360);

    store.close(root);
}

#[test]
fn test_denied_root_child_leaves_only_root_counted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deny_root.coffer");

    let mut store = CompoundStore::new();
    Generator::new(GenerationSpec::new(1))
        .generate(&mut store, &path)
        .unwrap();

    let mut inner = CompoundStore::new();
    let root = inner.open_root(&path, true).unwrap();
    let mut store = DenyingStore::new(inner, "LocalDocs");

    let report = aggregate(&mut store, root, &TraverseConfig::default());

    assert!(!report.succeeded());
    assert_eq!(report.containers, 1);
    assert_eq!(report.streams, 0);

    store.close(root);
}
