//! Node enumeration helper
//!
//! Presents a container's children as one materialized sequence despite the
//! store only supporting bounded-size pages. A page shorter than requested
//! ends the sequence; at exact page multiples that means one final empty
//! page request. The helper never assumes a total child count in advance.

use crate::error::StoreError;
use crate::store::{ContainerStore, Handle, Node};

/// Collect every immediate child of `container`.
///
/// Allocates one enumerator handle, scoped to this call and released on all
/// paths. A page-fetch failure discards anything collected so far and
/// surfaces the store's failure.
pub fn enumerate_children<S: ContainerStore + ?Sized>(
    store: &mut S,
    container: Handle,
    page_size: usize,
) -> Result<Vec<Node>, StoreError> {
    let cursor = store.open_enumerator(container)?;
    let result = drain_pages(store, cursor, page_size);
    store.close(cursor);
    result
}

fn drain_pages<S: ContainerStore + ?Sized>(
    store: &mut S,
    cursor: Handle,
    page_size: usize,
) -> Result<Vec<Node>, StoreError> {
    let mut children = Vec::new();
    loop {
        let page = store.next_page(cursor, page_size)?;
        let short = page.len() < page_size;
        children.extend(page);
        if short {
            return Ok(children);
        }
    }
}
