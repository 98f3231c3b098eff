//! Coffer: Compound Container File Tooling
//!
//! Inspects and synthesizes compound container files: single-file archives
//! that hold a tree of named containers and streams. Provides a one-level
//! listing, a whole-tree aggregation, and a deterministic generator for
//! producing test fixtures at scale.

pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod logging;
pub mod store;
pub mod traverse;
