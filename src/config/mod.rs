//! Configuration
//!
//! Layered configuration built with the `config` crate. Precedence, lowest
//! to highest: built-in defaults, global file, workspace file, environment.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod workspace;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use workspace::storage_paths::StorageConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Name of the per-workspace configuration file
pub const WORKSPACE_CONFIG_FILE: &str = "fssim.toml";

/// Effective configuration for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FssimConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FssimConfig {
    /// Render as TOML, as `fssim config` prints it.
    pub fn to_toml(&self) -> Result<String, crate::error::ApiError> {
        toml::to_string_pretty(self).map_err(|e| {
            crate::error::ApiError::ConfigError(format!("Failed to render config: {}", e))
        })
    }
}
