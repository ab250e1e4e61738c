//! Tool-specific error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or reading tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool '{0}' not found")]
    NotFound(String),

    /// The configured script directory is gone.
    #[error("Script directory '{}' does not exist", .0.display())]
    DirectoryMissing(PathBuf),

    /// A tool file exists but could not be read.
    #[error("Failed to read file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
