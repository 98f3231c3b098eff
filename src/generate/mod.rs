//! Generation Engine
//!
//! Deterministically synthesizes a compound container file for testing
//! readers at scale. The topology for `part_count = N` is fixed:
//!
//! ```text
//! root (Container)
//!  └─ "LocalDocs" (Container)
//!      └─ "PART_<i>" for i in [0, N)          (Container)
//!          └─ "PStg_<j>" for j in [0, 15)     (Container)
//!              └─ "PStg_<j>_Stream"           (Stream, 30 × 512 bytes)
//! ```
//!
//! Every stream carries the same repeating byte pattern, so content is fully
//! predictable: byte k of any stream equals k mod 256, with period 512.

use crate::error::StoreError;
use crate::store::{ContainerStore, Handle};
use tracing::{debug, info};

/// Name of the fixed index container under the root.
pub const LOCAL_DOCS: &str = "LocalDocs";

/// Sub-containers created under each part.
pub const SUB_CONTAINERS_PER_PART: u64 = 15;

/// Pattern blocks written per stream.
pub const WRITE_BLOCK_COUNT: u64 = 30;

/// Bytes per pattern block, which is also the pattern period.
pub const WRITE_BLOCK_SIZE: u64 = 512;

/// Read-only description of one generation run.
#[derive(Debug, Clone, Copy)]
pub struct GenerationSpec {
    pub part_count: u64,
}

impl GenerationSpec {
    pub fn new(part_count: u64) -> Self {
        Self { part_count }
    }

    /// Bytes in each generated stream.
    pub fn stream_len(&self) -> u64 {
        WRITE_BLOCK_COUNT * WRITE_BLOCK_SIZE
    }

    /// Containers the run will create, root and index container included.
    pub fn expected_containers(&self) -> u64 {
        self.part_count * SUB_CONTAINERS_PER_PART + 2
    }

    pub fn expected_streams(&self) -> u64 {
        self.part_count * SUB_CONTAINERS_PER_PART
    }

    pub fn expected_stream_bytes(&self) -> u64 {
        self.expected_streams() * self.stream_len()
    }
}

/// Synthesizes the fixed topology through a [`ContainerStore`].
pub struct Generator {
    spec: GenerationSpec,
    /// One pattern block, built once and written 30 times per stream.
    pattern: Vec<u8>,
}

impl Generator {
    pub fn new(spec: GenerationSpec) -> Self {
        let pattern = (0..WRITE_BLOCK_SIZE).map(|k| (k % 256) as u8).collect();
        Self { spec, pattern }
    }

    pub fn spec(&self) -> &GenerationSpec {
        &self.spec
    }

    /// Create the archive at `path` and populate it.
    ///
    /// The first failure to create a container or stream, or to write,
    /// aborts the run; siblings already created are not rolled back. The
    /// archive is committed only after the whole tree is built.
    pub fn generate<S: ContainerStore + ?Sized>(
        &self,
        store: &mut S,
        path: &std::path::Path,
    ) -> Result<(), StoreError> {
        info!(
            path = %path.display(),
            parts = self.spec.part_count,
            "generating compound archive"
        );

        let root = store.create_root(path, true)?;
        let result = self.populate_root(store, root);
        store.close(root);
        result?;

        store.commit()?;
        info!(
            containers = self.spec.expected_containers(),
            streams = self.spec.expected_streams(),
            stream_bytes = self.spec.expected_stream_bytes(),
            "generation complete"
        );
        Ok(())
    }

    fn populate_root<S: ContainerStore + ?Sized>(
        &self,
        store: &mut S,
        root: Handle,
    ) -> Result<(), StoreError> {
        let docs = store.create_child_container(root, LOCAL_DOCS)?;
        let result = self.generate_parts(store, docs);
        store.close(docs);
        result
    }

    fn generate_parts<S: ContainerStore + ?Sized>(
        &self,
        store: &mut S,
        docs: Handle,
    ) -> Result<(), StoreError> {
        for i in 0..self.spec.part_count {
            let name = format!("PART_{}", i);
            debug!(part = %name, "generating part");
            let part = store.create_child_container(docs, &name)?;
            let result = self.generate_part(store, part);
            store.close(part);
            result?;
        }
        Ok(())
    }

    fn generate_part<S: ContainerStore + ?Sized>(
        &self,
        store: &mut S,
        part: Handle,
    ) -> Result<(), StoreError> {
        for j in 0..SUB_CONTAINERS_PER_PART {
            let name = format!("PStg_{}", j);
            let sub = store.create_child_container(part, &name)?;
            let result = self.fill_sub_container(store, sub, &name);
            store.close(sub);
            result?;
        }
        Ok(())
    }

    fn fill_sub_container<S: ContainerStore + ?Sized>(
        &self,
        store: &mut S,
        sub: Handle,
        sub_name: &str,
    ) -> Result<(), StoreError> {
        let stream_name = format!("{}_Stream", sub_name);
        let stream = store.create_child_stream(sub, &stream_name)?;
        let result = self.write_pattern(store, stream, &stream_name);
        store.close(stream);
        result
    }

    fn write_pattern<S: ContainerStore + ?Sized>(
        &self,
        store: &mut S,
        stream: Handle,
        stream_name: &str,
    ) -> Result<(), StoreError> {
        for _ in 0..WRITE_BLOCK_COUNT {
            let written = store.write_stream(stream, &self.pattern)?;
            if written != self.pattern.len() as u64 {
                return Err(StoreError::Write {
                    name: stream_name.to_string(),
                    reason: format!(
                        "short write: {} of {} bytes",
                        written,
                        self.pattern.len()
                    ),
                });
            }
        }
        Ok(())
    }
}
