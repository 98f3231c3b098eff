//! Container Store
//!
//! The store owns the on-disk layout of a compound container file and hands
//! out opaque handles to open containers, streams, and enumerators. The
//! traversal and generation engines talk only to the [`ContainerStore`]
//! trait; [`CompoundStore`] is the single-file backend.

pub mod compound;

pub use compound::CompoundStore;

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of entries requested per enumeration page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Node kind tag
///
/// Lockbytes and Property are placeholders: the generator never creates
/// them, but traversal counts them when a store reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Container,
    Stream,
    Lockbytes,
    Property,
}

/// A named entry inside a container
///
/// `size` is the declared byte length and is meaningful only for streams.
/// Sizes are kept as u64 end to end; nothing truncates to 32 bits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub size: u64,
}

/// Opaque, store-owned reference to an open container, stream, or enumerator.
///
/// Handles are minted only by the store. Whoever opened a handle must close
/// it on every exit path; `close` is idempotent, and a closed handle must
/// never be used again. Parent and child handles are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub(crate) u64);

/// Persistent, hierarchical open/create/enumerate/read/write operations
/// over containers and streams within one archive file.
///
/// Every call is blocking and either completes or fails before the caller
/// proceeds. Enumeration is paginated: `next_page` returns up to
/// `page_size` entries, and a page shorter than requested (including an
/// empty one) signals end of sequence. Enumeration order is the store's
/// choice but must be stable across calls on an unmodified archive.
pub trait ContainerStore {
    /// Open the root container of an existing archive.
    fn open_root(&mut self, path: &Path, read_only: bool) -> Result<Handle, StoreError>;

    /// Create a fresh archive and return its root container. Fails if the
    /// file exists and `overwrite` is false.
    fn create_root(&mut self, path: &Path, overwrite: bool) -> Result<Handle, StoreError>;

    /// Open a named child container of `parent`.
    fn open_child_container(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError>;

    /// Create a named child container under `parent`. Duplicate names fail;
    /// the store is the authority on name uniqueness within a container.
    fn create_child_container(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError>;

    /// Open a named child stream of `parent`.
    fn open_child_stream(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError>;

    /// Create a named child stream under `parent`.
    fn create_child_stream(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError>;

    /// Read an open stream's entire payload.
    fn read_stream(&mut self, stream: Handle) -> Result<Vec<u8>, StoreError>;

    /// Append bytes to an open stream, returning the count written.
    fn write_stream(&mut self, stream: Handle, bytes: &[u8]) -> Result<u64, StoreError>;

    /// Allocate an enumerator over `container`'s immediate children.
    fn open_enumerator(&mut self, container: Handle) -> Result<Handle, StoreError>;

    /// Fetch the next page of at most `page_size` child entries.
    fn next_page(&mut self, enumerator: Handle, page_size: usize) -> Result<Vec<Node>, StoreError>;

    /// Describe an open container or stream.
    fn stat(&self, handle: Handle) -> Result<Node, StoreError>;

    /// Persist a writable archive to disk atomically.
    fn commit(&mut self) -> Result<(), StoreError>;

    /// Release a handle. Idempotent; closing an unknown handle is a no-op.
    fn close(&mut self, handle: Handle);
}
