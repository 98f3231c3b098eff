//! Enumeration pagination behavior observed through the store trait.

use crate::integration::support::CountingStore;
use coffer::store::{CompoundStore, ContainerStore};
use coffer::traverse::enumerate_children;
use tempfile::TempDir;

fn store_with_children(count: usize) -> (CompoundStore, coffer::store::Handle, TempDir) {
    let dir = TempDir::new().unwrap();
    let mut store = CompoundStore::new();
    let root = store
        .create_root(&dir.path().join("page.coffer"), true)
        .unwrap();
    for i in 0..count {
        store
            .create_child_container(root, &format!("child_{:03}", i))
            .unwrap();
    }
    (store, root, dir)
}

/// With exactly one full page of children, the helper must issue a second
/// page request that comes back empty rather than stopping after the first
/// full page.
#[test]
fn test_exact_page_boundary_issues_trailing_request() {
    let (inner, root, _dir) = store_with_children(100);
    let mut store = CountingStore::new(inner);

    let children = enumerate_children(&mut store, root, 100).unwrap();

    assert_eq!(children.len(), 100);
    assert_eq!(store.page_requests, 2);
}

/// A final short page ends the sequence without an extra request.
#[test]
fn test_short_final_page_ends_sequence() {
    let (inner, root, _dir) = store_with_children(150);
    let mut store = CountingStore::new(inner);

    let children = enumerate_children(&mut store, root, 100).unwrap();

    assert_eq!(children.len(), 150);
    assert_eq!(store.page_requests, 2);
}

/// An empty container takes exactly one (empty) page request.
#[test]
fn test_empty_container_single_request() {
    let (inner, root, _dir) = store_with_children(0);
    let mut store = CountingStore::new(inner);

    let children = enumerate_children(&mut store, root, 100).unwrap();

    assert!(children.is_empty());
    assert_eq!(store.page_requests, 1);
}

/// Order is the store's enumeration order, repeated identically per call.
#[test]
fn test_enumeration_order_stable_across_calls() {
    let (mut store, root, _dir) = store_with_children(25);

    let first = enumerate_children(&mut store, root, 10).unwrap();
    let second = enumerate_children(&mut store, root, 10).unwrap();

    assert_eq!(first, second);
}
