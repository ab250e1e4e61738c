//! Catalog-specific error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading catalog assets.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A template or static file shipped with the deployment is missing.
    #[error("Asset '{0}' not found")]
    AssetMissing(String),

    /// An asset exists but could not be read.
    #[error("Failed to read asset '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    /// Create a new "asset missing" error.
    pub fn asset_missing(name: impl Into<String>) -> Self {
        Self::AssetMissing(name.into())
    }
}
