//! Shared store wrappers for integration tests.
//!
//! Both wrappers delegate to a real `CompoundStore` and intercept exactly
//! one behavior, letting tests observe paging traffic and injected open
//! failures through the public trait.

use coffer::error::StoreError;
use coffer::store::{CompoundStore, ContainerStore, Handle, Node};
use std::path::Path;

/// Counts `next_page` calls.
pub struct CountingStore {
    pub inner: CompoundStore,
    pub page_requests: usize,
}

impl CountingStore {
    pub fn new(inner: CompoundStore) -> Self {
        Self {
            inner,
            page_requests: 0,
        }
    }
}

impl ContainerStore for CountingStore {
    fn open_root(&mut self, path: &Path, read_only: bool) -> Result<Handle, StoreError> {
        self.inner.open_root(path, read_only)
    }
    fn create_root(&mut self, path: &Path, overwrite: bool) -> Result<Handle, StoreError> {
        self.inner.create_root(path, overwrite)
    }
    fn open_child_container(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        self.inner.open_child_container(parent, name)
    }
    fn create_child_container(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        self.inner.create_child_container(parent, name)
    }
    fn open_child_stream(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        self.inner.open_child_stream(parent, name)
    }
    fn create_child_stream(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        self.inner.create_child_stream(parent, name)
    }
    fn read_stream(&mut self, stream: Handle) -> Result<Vec<u8>, StoreError> {
        self.inner.read_stream(stream)
    }
    fn write_stream(&mut self, stream: Handle, bytes: &[u8]) -> Result<u64, StoreError> {
        self.inner.write_stream(stream, bytes)
    }
    fn open_enumerator(&mut self, container: Handle) -> Result<Handle, StoreError> {
        self.inner.open_enumerator(container)
    }
    fn next_page(&mut self, enumerator: Handle, page_size: usize) -> Result<Vec<Node>, StoreError> {
        self.page_requests += 1;
        self.inner.next_page(enumerator, page_size)
    }
    fn stat(&self, handle: Handle) -> Result<Node, StoreError> {
        self.inner.stat(handle)
    }
    fn commit(&mut self) -> Result<(), StoreError> {
        self.inner.commit()
    }
    fn close(&mut self, handle: Handle) {
        self.inner.close(handle)
    }
}

/// Refuses to open one named child container.
pub struct DenyingStore {
    pub inner: CompoundStore,
    pub deny: String,
}

impl DenyingStore {
    pub fn new(inner: CompoundStore, deny: &str) -> Self {
        Self {
            inner,
            deny: deny.to_string(),
        }
    }
}

impl ContainerStore for DenyingStore {
    fn open_root(&mut self, path: &Path, read_only: bool) -> Result<Handle, StoreError> {
        self.inner.open_root(path, read_only)
    }
    fn create_root(&mut self, path: &Path, overwrite: bool) -> Result<Handle, StoreError> {
        self.inner.create_root(path, overwrite)
    }
    fn open_child_container(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        if name == self.deny {
            return Err(StoreError::Open {
                name: name.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        self.inner.open_child_container(parent, name)
    }
    fn create_child_container(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        self.inner.create_child_container(parent, name)
    }
    fn open_child_stream(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        self.inner.open_child_stream(parent, name)
    }
    fn create_child_stream(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        self.inner.create_child_stream(parent, name)
    }
    fn read_stream(&mut self, stream: Handle) -> Result<Vec<u8>, StoreError> {
        self.inner.read_stream(stream)
    }
    fn write_stream(&mut self, stream: Handle, bytes: &[u8]) -> Result<u64, StoreError> {
        self.inner.write_stream(stream, bytes)
    }
    fn open_enumerator(&mut self, container: Handle) -> Result<Handle, StoreError> {
        self.inner.open_enumerator(container)
    }
    fn next_page(&mut self, enumerator: Handle, page_size: usize) -> Result<Vec<Node>, StoreError> {
        self.inner.next_page(enumerator, page_size)
    }
    fn stat(&self, handle: Handle) -> Result<Node, StoreError> {
        self.inner.stat(handle)
    }
    fn commit(&mut self) -> Result<(), StoreError> {
        self.inner.commit()
    }
    fn close(&mut self, handle: Handle) {
        self.inner.close(handle)
    }
}
