//! Error types and handling for the web installer.
//!
//! This module defines the unified error type every request path converges
//! on. Its variants follow the failure taxonomy surfaced at the HTTP boundary:
//! `NotFound` becomes a 404, everything else a 500.

use std::path::PathBuf;
use thiserror::Error;

use crate::domains::catalog::CatalogError;
use crate::domains::tools::ToolError;

/// A specialized Result type for web installer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the web installer.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested tool or file does not resolve to anything on disk.
    #[error("{0}")]
    NotFound(String),

    /// A template or asset that is part of the deployment is missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file that was just confirmed to exist could not be read.
    #[error("Failed to read file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O errors outside of request content reads.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new "not found" error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new read error for `path`.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is surfaced as a client-side "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<ToolError> for Error {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(_) => Self::NotFound(err.to_string()),
            ToolError::DirectoryMissing(_) => Self::Config(err.to_string()),
            ToolError::Read { path, source } => Self::Read { path, source },
        }
    }
}

impl From<CatalogError> for Error {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::AssetMissing(_) => Self::Config(err.to_string()),
            CatalogError::Read { path, source } => Self::Read { path, source },
        }
    }
}
