//! Built-in defaults every configuration build starts from.

use crate::config::workspace::storage_paths::{
    DEFAULT_JOURNAL_PATH, DEFAULT_SAVE_ON_EXIT, DEFAULT_SNAPSHOT_PATH,
};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder seeded with storage defaults. Later sources override these.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("storage.snapshot_path", DEFAULT_SNAPSHOT_PATH)?
        .set_default("storage.journal_path", DEFAULT_JOURNAL_PATH)?
        .set_default("storage.save_on_exit", DEFAULT_SAVE_ON_EXIT)
}
