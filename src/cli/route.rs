//! CLI route: resolves an operation against a store and renders the result.

use crate::cli::parse::Operation;
use crate::cli::presentation;
use crate::config::{CofferConfig, ConfigLoader};
use crate::error::CofferError;
use crate::generate::{GenerationSpec, Generator};
use crate::store::{CompoundStore, ContainerStore, Handle};
use crate::traverse::{aggregate, list_children};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Rendering choice for list/aggregate results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Result<Self, CofferError> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CofferError::Config(format!(
                "invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// Execution context for one CLI invocation.
pub struct RunContext {
    config: CofferConfig,
    format: OutputFormat,
}

impl RunContext {
    pub fn new(config_path: Option<&Path>, format: &str) -> Result<Self, CofferError> {
        Ok(Self {
            config: ConfigLoader::load(config_path)?,
            format: OutputFormat::parse(format)?,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_config(config: CofferConfig, format: OutputFormat) -> Self {
        Self { config, format }
    }

    /// Run one operation and return its rendered output.
    ///
    /// A traversal that fails mid-tree still renders its frozen report;
    /// only failing to reach the archive at all is an `Err` here.
    pub fn execute(&self, operation: &Operation) -> Result<String, CofferError> {
        match operation {
            Operation::List { path } => self.list(path),
            Operation::Aggregate { path } => self.aggregate(path),
            Operation::Generate { path, part_count } => self.generate(path, *part_count),
        }
    }

    fn list(&self, path: &Path) -> Result<String, CofferError> {
        info!(path = %path.display(), "listing top level");
        let mut store = CompoundStore::new();

        let started = Instant::now();
        let root = store.open_root(path, true)?;
        let open_time = started.elapsed();

        let result = self.list_open_root(&mut store, root, path, open_time);
        store.close(root);
        result
    }

    fn list_open_root(
        &self,
        store: &mut CompoundStore,
        root: Handle,
        path: &Path,
        open_time: std::time::Duration,
    ) -> Result<String, CofferError> {
        let root_stat = store.stat(root)?;
        let entries = list_children(store, root, 1, self.config.traverse.page_size)?;
        Ok(match self.format {
            OutputFormat::Text => {
                presentation::format_listing(path, open_time, &root_stat, &entries)
            }
            OutputFormat::Json => {
                presentation::format_listing_json(path, open_time, &root_stat, &entries)
            }
        })
    }

    fn aggregate(&self, path: &Path) -> Result<String, CofferError> {
        info!(path = %path.display(), "aggregating whole tree");
        let mut store = CompoundStore::new();
        let root = store.open_root(path, true)?;
        let report = aggregate(&mut store, root, &self.config.traverse);
        store.close(root);

        Ok(match self.format {
            OutputFormat::Text => presentation::format_report(path, &report),
            OutputFormat::Json => presentation::format_report_json(path, &report),
        })
    }

    fn generate(&self, path: &Path, part_count: u64) -> Result<String, CofferError> {
        let generator = Generator::new(GenerationSpec::new(part_count));
        let mut store = CompoundStore::new();
        generator.generate(&mut store, path)?;
        Ok(presentation::format_generation_summary(
            path,
            generator.spec(),
        ))
    }
}
