//! Configuration System
//!
//! Layered configuration for the CLI: defaults, then an optional TOML file,
//! then `COFFER_*` environment variables. Nothing here is required; every
//! field has a working default.

use crate::error::CofferError;
use crate::logging::LoggingConfig;
use crate::traverse::TraverseConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CofferConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Traversal tuning (page size, depth limit)
    #[serde(default)]
    pub traverse: TraverseConfig,
}

impl CofferConfig {
    /// Validate field ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), CofferError> {
        if self.traverse.page_size == 0 {
            return Err(CofferError::Config(
                "traverse.page_size must be at least 1".to_string(),
            ));
        }
        if self.traverse.max_depth == 0 {
            return Err(CofferError::Config(
                "traverse.max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from an optional file path plus environment.
    ///
    /// Environment variables use the `COFFER_` prefix with `__` as the
    /// nesting separator, e.g. `COFFER_TRAVERSE__MAX_DEPTH=64`.
    pub fn load(path: Option<&Path>) -> Result<CofferConfig, CofferError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("COFFER")
                .separator("__")
                .try_parsing(true),
        );

        let config: CofferConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
