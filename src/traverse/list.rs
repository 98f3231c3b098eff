//! One-level listing
//!
//! Snapshot of a container's immediate children for display. Child
//! containers additionally report their own immediate child count on a
//! best-effort basis: failing to compute one degrades that entry to
//! "unknown" rather than failing the listing.

use crate::error::StoreError;
use crate::store::{ContainerStore, Handle, Node, NodeKind};
use crate::traverse::enumerate::enumerate_children;

/// One listed child, with the indentation level it should render at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub node: Node,
    /// Immediate child count, for container entries. `None` means the count
    /// could not be determined; streams never carry one.
    pub child_count: Option<u64>,
    pub indent: usize,
}

/// List the immediate children of `container`.
///
/// A single enumeration pass is materialized; there is no separate counting
/// pass. Failure to enumerate `container` itself is fatal and propagated.
pub fn list_children<S: ContainerStore + ?Sized>(
    store: &mut S,
    container: Handle,
    indent: usize,
    page_size: usize,
) -> Result<Vec<ListEntry>, StoreError> {
    let children = enumerate_children(store, container, page_size)?;

    let mut entries = Vec::with_capacity(children.len());
    for node in children {
        let child_count = match node.kind {
            NodeKind::Container => count_children(store, container, &node.name, page_size),
            _ => None,
        };
        entries.push(ListEntry {
            node,
            child_count,
            indent,
        });
    }
    Ok(entries)
}

/// Best-effort immediate child count of a named child container.
fn count_children<S: ContainerStore + ?Sized>(
    store: &mut S,
    parent: Handle,
    name: &str,
    page_size: usize,
) -> Option<u64> {
    let child = store.open_child_container(parent, name).ok()?;
    let count = enumerate_children(store, child, page_size).map(|c| c.len() as u64);
    store.close(child);
    count.ok()
}
