//! Error types
//!
//! `OpError` covers the expected, caller-visible outcomes of tree operations.
//! `StorageError` covers snapshot and journal I/O. `ApiError` is what the
//! front ends surface to the user.

use thiserror::Error;

/// Outcome of a rejected tree operation. None of these is a system defect.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OpError {
    #[error("an entry named '{0}' already exists")]
    NameCollision(String),

    #[error("'{0}' not found")]
    NotFound(String),

    #[error("destination '{0}' is not a directory")]
    InvalidTarget(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("invalid name '{0}'")]
    InvalidName(String),
}

impl OpError {
    /// Every reason `journal_reason` can produce.
    pub const JOURNAL_REASONS: [&'static str; 5] =
        ["EXISTS", "NOT FOUND", "INVALID TARGET", "UNSUPPORTED", "INVALID NAME"];

    /// Journal status suffix for this failure (`FAIL - <reason>`).
    pub fn journal_reason(&self) -> &'static str {
        match self {
            OpError::NameCollision(_) => "EXISTS",
            OpError::NotFound(_) => "NOT FOUND",
            OpError::InvalidTarget(_) => "INVALID TARGET",
            OpError::Unsupported(_) => "UNSUPPORTED",
            OpError::InvalidName(_) => "INVALID NAME",
        }
    }
}

/// Snapshot and journal persistence errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::SerializationError(err.to_string())
    }
}

/// Front-end level errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("{0}")]
    Operation(#[from] OpError),

    #[error("{0}")]
    Usage(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
