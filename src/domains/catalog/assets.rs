//! Catalog asset loading.
//!
//! The browser catalog is assembled from `templates/index.html` plus the
//! stylesheet and script under `static/`. Assets are read per request so a
//! redeploy of the asset directory takes effect immediately.

use std::fs;
use std::path::PathBuf;
use tracing::warn;

use super::error::CatalogError;
use crate::core::config::SecurityConfig;
use crate::core::security::{resolve_within, PathSecurityError};

/// HTML page template.
pub const INDEX_TEMPLATE: &str = "index.html";
/// Stylesheet inlined into the page.
pub const STYLE_SHEET: &str = "style.css";
/// Script inlined into the page.
pub const SCRIPT: &str = "script.js";
/// Icon served at `/favicon.ico`.
pub const FAVICON: &str = "favicon.png";

/// Read access to the asset directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    dir: PathBuf,
    security: SecurityConfig,
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>, security: SecurityConfig) -> Self {
        Self {
            dir: dir.into(),
            security,
        }
    }

    /// Directory served under `/static`.
    pub fn static_dir(&self) -> PathBuf {
        self.dir.join("static")
    }

    /// Load a page template from `templates/`.
    pub fn template(&self, name: &str) -> Result<String, CatalogError> {
        self.read_text(&format!("templates/{name}"))
    }

    /// Load a static text file from `static/`.
    pub fn static_text(&self, name: &str) -> Result<String, CatalogError> {
        self.read_text(&format!("static/{name}"))
    }

    /// Load a static binary file from `static/`.
    pub fn static_bytes(&self, name: &str) -> Result<Vec<u8>, CatalogError> {
        let path = self.locate(&format!("static/{name}"))?;
        fs::read(&path).map_err(|source| CatalogError::Read { path, source })
    }

    fn read_text(&self, relative: &str) -> Result<String, CatalogError> {
        let path = self.locate(relative)?;
        fs::read_to_string(&path).map_err(|source| CatalogError::Read { path, source })
    }

    fn locate(&self, relative: &str) -> Result<PathBuf, CatalogError> {
        resolve_within(&self.dir, relative, &self.security).map_err(|e| {
            if !matches!(e, PathSecurityError::PathNotFound { .. }) {
                warn!("Rejected asset {}: {}", relative, e);
            }
            CatalogError::asset_missing(relative)
        })
    }
}
