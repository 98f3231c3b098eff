//! Traversal Engine
//!
//! Depth-first inspection of a container tree through the store trait:
//! either a one-level listing with per-child summary counts, or a
//! whole-tree aggregate of per-kind statistics.

pub mod aggregate;
pub mod enumerate;
pub mod list;

pub use aggregate::{aggregate, TraverseReport};
pub use enumerate::enumerate_children;
pub use list::{list_children, ListEntry};

use serde::{Deserialize, Serialize};

/// Traversal tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraverseConfig {
    /// Entries requested per enumeration page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum recursion depth before aggregation fails with
    /// `DepthExceeded`. Containers form a tree by construction of the
    /// store, but a hostile or corrupt archive could still nest deeply
    /// enough to exhaust the stack without this bound.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_page_size() -> usize {
    crate::store::DEFAULT_PAGE_SIZE
}

fn default_max_depth() -> usize {
    128
}

impl Default for TraverseConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_depth: default_max_depth(),
        }
    }
}
