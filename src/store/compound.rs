//! Single-file compound archive backend
//!
//! Stores the whole node tree as one bincode-encoded image behind a version
//! field. The image is loaded in full on open and persisted on commit using
//! an atomic write (write to a temp file, then rename), so a reader never
//! observes a half-written archive.

use crate::error::StoreError;
use crate::store::{ContainerStore, Handle, Node, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bumped whenever the on-disk image layout changes.
const ARCHIVE_VERSION: u32 = 1;

/// One node in the archive arena. Containers keep child indices in
/// insertion order; that order is what enumerators replay.
#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    name: String,
    kind: NodeKind,
    data: Vec<u8>,
    children: Vec<usize>,
}

impl Entry {
    fn container(name: &str) -> Self {
        Entry {
            name: name.to_string(),
            kind: NodeKind::Container,
            data: Vec::new(),
            children: Vec::new(),
        }
    }

    fn stream(name: &str) -> Self {
        Entry {
            name: name.to_string(),
            kind: NodeKind::Stream,
            data: Vec::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Serialize)]
struct ImageRef<'a> {
    version: u32,
    entries: &'a [Entry],
}

#[derive(Deserialize)]
struct Image {
    version: u32,
    entries: Vec<Entry>,
}

/// What an open handle refers to.
#[derive(Debug, Clone, Copy)]
enum OpenState {
    Container(usize),
    Stream(usize),
    Enumerator { node: usize, cursor: usize },
}

/// Single-file archive store.
///
/// Holds at most one archive at a time. The arena index 0 is always the
/// root container.
pub struct CompoundStore {
    path: Option<PathBuf>,
    read_only: bool,
    entries: Vec<Entry>,
    open: HashMap<u64, OpenState>,
    next_handle: u64,
}

impl CompoundStore {
    pub fn new() -> Self {
        CompoundStore {
            path: None,
            read_only: true,
            entries: Vec::new(),
            open: HashMap::new(),
            next_handle: 1,
        }
    }

    fn mint(&mut self, state: OpenState) -> Handle {
        let id = self.next_handle;
        self.next_handle += 1;
        self.open.insert(id, state);
        Handle(id)
    }

    fn container_index(&self, handle: Handle) -> Result<usize, StoreError> {
        match self.open.get(&handle.0) {
            Some(OpenState::Container(idx)) => Ok(*idx),
            Some(_) => Err(StoreError::InvalidHandle(
                "expected a container handle".to_string(),
            )),
            None => Err(StoreError::InvalidHandle(
                "handle is not open".to_string(),
            )),
        }
    }

    fn stream_index(&self, handle: Handle) -> Result<usize, StoreError> {
        match self.open.get(&handle.0) {
            Some(OpenState::Stream(idx)) => Ok(*idx),
            Some(_) => Err(StoreError::InvalidHandle(
                "expected a stream handle".to_string(),
            )),
            None => Err(StoreError::InvalidHandle(
                "handle is not open".to_string(),
            )),
        }
    }

    fn node_of(&self, idx: usize) -> Node {
        let entry = &self.entries[idx];
        Node {
            name: entry.name.clone(),
            kind: entry.kind,
            size: entry.data.len() as u64,
        }
    }

    fn find_child(&self, parent: usize, name: &str) -> Option<usize> {
        self.entries[parent]
            .children
            .iter()
            .copied()
            .find(|&idx| self.entries[idx].name == name)
    }

    fn create_child(
        &mut self,
        parent: Handle,
        entry: Entry,
    ) -> Result<usize, StoreError> {
        let parent_idx = self.container_index(parent)?;
        if self.read_only {
            return Err(StoreError::Open {
                name: entry.name,
                reason: "archive is open read-only".to_string(),
            });
        }
        if self.find_child(parent_idx, &entry.name).is_some() {
            return Err(StoreError::Open {
                name: entry.name,
                reason: format!(
                    "a child with that name already exists in {:?}",
                    self.entries[parent_idx].name
                ),
            });
        }
        let idx = self.entries.len();
        self.entries.push(entry);
        self.entries[parent_idx].children.push(idx);
        Ok(idx)
    }

    fn root_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string())
    }

    /// Insert a child entry of an arbitrary kind, bypassing the create API.
    /// Lets tests exercise the Lockbytes/Property counters, which the
    /// generator never produces.
    #[cfg(test)]
    pub(crate) fn insert_placeholder(
        &mut self,
        parent: Handle,
        name: &str,
        kind: NodeKind,
    ) -> Result<(), StoreError> {
        let parent_idx = self.container_index(parent)?;
        let idx = self.entries.len();
        self.entries.push(Entry {
            name: name.to_string(),
            kind,
            data: Vec::new(),
            children: Vec::new(),
        });
        self.entries[parent_idx].children.push(idx);
        Ok(())
    }
}

impl Default for CompoundStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerStore for CompoundStore {
    fn open_root(&mut self, path: &Path, read_only: bool) -> Result<Handle, StoreError> {
        if !self.open.is_empty() {
            return Err(StoreError::Open {
                name: path.display().to_string(),
                reason: "store already has open handles".to_string(),
            });
        }

        let bytes = fs::read(path).map_err(|e| StoreError::Open {
            name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let image: Image = bincode::deserialize(&bytes).map_err(|e| StoreError::Open {
            name: path.display().to_string(),
            reason: format!("not a compound archive: {}", e),
        })?;
        if image.version != ARCHIVE_VERSION {
            return Err(StoreError::Open {
                name: path.display().to_string(),
                reason: format!(
                    "unsupported archive version {} (expected {})",
                    image.version, ARCHIVE_VERSION
                ),
            });
        }
        if image.entries.is_empty() || image.entries[0].kind != NodeKind::Container {
            return Err(StoreError::Open {
                name: path.display().to_string(),
                reason: "archive has no root container".to_string(),
            });
        }

        debug!(path = %path.display(), entries = image.entries.len(), "opened archive");
        self.entries = image.entries;
        self.path = Some(path.to_path_buf());
        self.read_only = read_only;
        Ok(self.mint(OpenState::Container(0)))
    }

    fn create_root(&mut self, path: &Path, overwrite: bool) -> Result<Handle, StoreError> {
        if !self.open.is_empty() {
            return Err(StoreError::Open {
                name: path.display().to_string(),
                reason: "store already has open handles".to_string(),
            });
        }
        if !overwrite && path.exists() {
            return Err(StoreError::Open {
                name: path.display().to_string(),
                reason: "file already exists".to_string(),
            });
        }

        self.entries = vec![Entry::container(&Self::root_name(path))];
        self.path = Some(path.to_path_buf());
        self.read_only = false;
        Ok(self.mint(OpenState::Container(0)))
    }

    fn open_child_container(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        let parent_idx = self.container_index(parent)?;
        let idx = self
            .find_child(parent_idx, name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        if self.entries[idx].kind != NodeKind::Container {
            return Err(StoreError::Open {
                name: name.to_string(),
                reason: "node is not a container".to_string(),
            });
        }
        Ok(self.mint(OpenState::Container(idx)))
    }

    fn create_child_container(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        let idx = self.create_child(parent, Entry::container(name))?;
        Ok(self.mint(OpenState::Container(idx)))
    }

    fn open_child_stream(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        let parent_idx = self.container_index(parent)?;
        let idx = self
            .find_child(parent_idx, name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        if self.entries[idx].kind != NodeKind::Stream {
            return Err(StoreError::Open {
                name: name.to_string(),
                reason: "node is not a stream".to_string(),
            });
        }
        Ok(self.mint(OpenState::Stream(idx)))
    }

    fn create_child_stream(&mut self, parent: Handle, name: &str) -> Result<Handle, StoreError> {
        let idx = self.create_child(parent, Entry::stream(name))?;
        Ok(self.mint(OpenState::Stream(idx)))
    }

    fn read_stream(&mut self, stream: Handle) -> Result<Vec<u8>, StoreError> {
        let idx = self.stream_index(stream)?;
        Ok(self.entries[idx].data.clone())
    }

    fn write_stream(&mut self, stream: Handle, bytes: &[u8]) -> Result<u64, StoreError> {
        let idx = self.stream_index(stream)?;
        if self.read_only {
            return Err(StoreError::Write {
                name: self.entries[idx].name.clone(),
                reason: "archive is open read-only".to_string(),
            });
        }
        self.entries[idx].data.extend_from_slice(bytes);
        Ok(bytes.len() as u64)
    }

    fn open_enumerator(&mut self, container: Handle) -> Result<Handle, StoreError> {
        let idx = self.container_index(container)?;
        Ok(self.mint(OpenState::Enumerator {
            node: idx,
            cursor: 0,
        }))
    }

    fn next_page(&mut self, enumerator: Handle, page_size: usize) -> Result<Vec<Node>, StoreError> {
        let (node, cursor) = match self.open.get(&enumerator.0) {
            Some(OpenState::Enumerator { node, cursor }) => (*node, *cursor),
            _ => {
                return Err(StoreError::InvalidHandle(
                    "expected an enumerator handle".to_string(),
                ))
            }
        };

        let children = &self.entries[node].children;
        let end = children.len().min(cursor + page_size);
        let page: Vec<Node> = children[cursor..end]
            .iter()
            .map(|&idx| self.node_of(idx))
            .collect();

        self.open.insert(
            enumerator.0,
            OpenState::Enumerator { node, cursor: end },
        );
        Ok(page)
    }

    fn stat(&self, handle: Handle) -> Result<Node, StoreError> {
        match self.open.get(&handle.0) {
            Some(OpenState::Container(idx)) | Some(OpenState::Stream(idx)) => {
                Ok(self.node_of(*idx))
            }
            Some(OpenState::Enumerator { .. }) => Err(StoreError::InvalidHandle(
                "cannot stat an enumerator".to_string(),
            )),
            None => Err(StoreError::InvalidHandle(
                "handle is not open".to_string(),
            )),
        }
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        let path = self.path.clone().ok_or_else(|| StoreError::Write {
            name: "<archive>".to_string(),
            reason: "no archive is open".to_string(),
        })?;
        if self.read_only {
            return Err(StoreError::Write {
                name: path.display().to_string(),
                reason: "archive is open read-only".to_string(),
            });
        }

        let image = ImageRef {
            version: ARCHIVE_VERSION,
            entries: &self.entries,
        };
        let serialized = bincode::serialize(&image).map_err(|e| StoreError::Write {
            name: path.display().to_string(),
            reason: format!("failed to serialize archive image: {}", e),
        })?;

        let temp_path = path.with_extension("coffer.tmp");
        fs::write(&temp_path, &serialized).map_err(|e| StoreError::Write {
            name: temp_path.display().to_string(),
            reason: e.to_string(),
        })?;
        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StoreError::Write {
                name: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!(path = %path.display(), entries = self.entries.len(), "committed archive");
        Ok(())
    }

    fn close(&mut self, handle: Handle) {
        self.open.remove(&handle.0);
    }
}
