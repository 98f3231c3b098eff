//! Whole-tree aggregation
//!
//! Pre-order depth-first walk over every node reachable from a root
//! container, accumulating per-kind counts and total stream bytes. The walk
//! is fail-fast: the first failure to open a child or enumerate children
//! freezes the report and aborts the entire traversal, because aggregate
//! statistics are only meaningful over the complete tree.

use crate::error::StoreError;
use crate::store::{ContainerStore, Handle, NodeKind};
use crate::traverse::enumerate::enumerate_children;
use crate::traverse::TraverseConfig;
use tracing::{debug, info};

/// Accumulated traversal statistics.
///
/// All counters are u64; stream sizes are summed at full width. Once
/// `failure` is set the counts are frozen at whatever was accumulated
/// strictly before the failure point.
#[derive(Debug, Default)]
pub struct TraverseReport {
    pub containers: u64,
    pub streams: u64,
    pub lockbytes: u64,
    pub properties: u64,
    pub stream_bytes: u64,
    pub failure: Option<StoreError>,
}

impl TraverseReport {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}

/// Aggregate every node reachable from `root`.
///
/// `root` must be an open container handle; the caller keeps ownership and
/// closes it. Child handles opened during the walk are closed on every
/// path, including early returns on failure.
pub fn aggregate<S: ContainerStore + ?Sized>(
    store: &mut S,
    root: Handle,
    config: &TraverseConfig,
) -> TraverseReport {
    let mut report = TraverseReport::default();
    if let Err(e) = visit(store, root, 0, config, &mut report) {
        report.failure = Some(e);
    }
    info!(
        containers = report.containers,
        streams = report.streams,
        stream_bytes = report.stream_bytes,
        success = report.succeeded(),
        "traversal finished"
    );
    report
}

fn visit<S: ContainerStore + ?Sized>(
    store: &mut S,
    container: Handle,
    depth: usize,
    config: &TraverseConfig,
    report: &mut TraverseReport,
) -> Result<(), StoreError> {
    if depth >= config.max_depth {
        return Err(StoreError::DepthExceeded(config.max_depth));
    }

    report.containers += 1;

    let children = enumerate_children(store, container, config.page_size)?;
    for child in children {
        match child.kind {
            NodeKind::Container => {
                let handle = store.open_child_container(container, &child.name)?;
                debug!(name = %child.name, depth = depth + 1, "descending");
                let result = visit(store, handle, depth + 1, config, report);
                store.close(handle);
                result?;
            }
            NodeKind::Stream => {
                report.streams += 1;
                report.stream_bytes += child.size;
            }
            NodeKind::Lockbytes => {
                report.lockbytes += 1;
            }
            NodeKind::Property => {
                report.properties += 1;
            }
        }
    }
    Ok(())
}
