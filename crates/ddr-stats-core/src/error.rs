//! Error types for ddr-stats-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ddr-stats operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("No database selected")]
    NoStoreSelected,

    #[error("Play database not found at: {0}")]
    StoreNotFound(PathBuf),

    #[error("No match for '{0}'")]
    NoMatch(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid value in column {column}: {value:?}")]
    InvalidRecord { column: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for ddr-stats operations
pub type Result<T> = std::result::Result<T, Error>;
