//! Configuration management for the web installer.
//!
//! This module provides a centralized configuration structure that is
//! populated once at startup from defaults, a `.env` file, environment
//! variables and command-line flags, then shared read-only with every request.

use super::error::{Error, Result};
use super::transport::TransportConfig;
use super::version::resolve_tools_version;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the web installer.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Script directory and templating configuration.
    pub scripts: ScriptsConfig,

    /// Catalog asset configuration.
    pub assets: AssetsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Security and path validation configuration.
    pub security: SecurityConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as shown in logs.
    pub name: String,

    /// The version of the server binary.
    pub version: String,
}

/// Configuration for the served script directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptsConfig {
    /// Directory scanned for tools, include fragments and installer templates.
    pub dir: PathBuf,

    /// Naming-convention prefix carried by most tool files (e.g. `poor`).
    pub tool_prefix: String,

    /// Wrap inlined fragments with `# BEGIN INCLUDE` / `# END INCLUDE` lines.
    pub include_markers: bool,

    /// Version stamped into scripts and listings.
    /// Empty until [`Config::resolve`] runs.
    pub version: String,
}

/// Configuration for the browser catalog assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Root holding `templates/index.html` and `static/`.
    pub dir: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for path confinement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Whether symlinks are followed when confining include and asset paths.
    /// Followed targets must still resolve inside the root. If false, a
    /// symlinked include or asset is rejected outright.
    pub allow_symlinks: bool,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            tool_prefix: "poor".to_string(),
            include_markers: false,
            version: String::new(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            allow_symlinks: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "poor-tools Web Installer".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            scripts: ScriptsConfig::default(),
            assets: AssetsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first. Recognized
    /// variables: `POOR_SCRIPT_DIR`, `POOR_ASSETS_DIR`, `POOR_TOOL_PREFIX`,
    /// `POOR_INCLUDE_MARKERS`, `POOR_ALLOW_SYMLINKS`, `POOR_LOG_LEVEL`, plus the
    /// transport variables read by [`TransportConfig::from_env`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(dir) = std::env::var("POOR_SCRIPT_DIR") {
            config.scripts.dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("POOR_ASSETS_DIR") {
            config.assets.dir = PathBuf::from(dir);
        }

        if let Ok(prefix) = std::env::var("POOR_TOOL_PREFIX") {
            config.scripts.tool_prefix = prefix;
        }

        if let Ok(markers) = std::env::var("POOR_INCLUDE_MARKERS") {
            config.scripts.include_markers = parse_flag(&markers).unwrap_or(false);
        }

        if let Ok(level) = std::env::var("POOR_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(allow_symlinks) = std::env::var("POOR_ALLOW_SYMLINKS") {
            config.security.allow_symlinks = parse_flag(&allow_symlinks).unwrap_or(true);
            info!("Symlinks allowed: {}", config.security.allow_symlinks);
        }

        config.transport = TransportConfig::from_env();

        config
    }

    /// Validate the script directory and resolve the tools version.
    ///
    /// A missing script directory is a fatal configuration error.
    pub fn resolve(mut self) -> Result<Self> {
        let dir = &self.scripts.dir;
        if !dir.is_dir() {
            return Err(Error::config(format!(
                "Script directory {} does not exist",
                dir.display()
            )));
        }
        self.scripts.dir = dir.canonicalize()?;

        if !self.assets.dir.is_dir() {
            warn!(
                "Assets directory {} not found - the browser catalog will fail",
                self.assets.dir.display()
            );
        }

        if self.scripts.version.is_empty() {
            self.scripts.version = resolve_tools_version(&self.scripts.dir);
        }
        info!(
            "Serving scripts from {} (version {})",
            self.scripts.dir.display(),
            self.scripts.version
        );

        Ok(self)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::env_guard;
    use tempfile::TempDir;

    #[test]
    fn test_script_dir_from_env() {
        let _guard = env_guard();
        unsafe {
            std::env::set_var("POOR_SCRIPT_DIR", "/srv/poor-tools");
            std::env::set_var("POOR_INCLUDE_MARKERS", "on");
        }
        let config = Config::from_env();
        assert_eq!(config.scripts.dir, PathBuf::from("/srv/poor-tools"));
        assert!(config.scripts.include_markers);
        unsafe {
            std::env::remove_var("POOR_SCRIPT_DIR");
            std::env::remove_var("POOR_INCLUDE_MARKERS");
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scripts.tool_prefix, "poor");
        assert!(!config.scripts.include_markers);
        assert!(config.security.allow_symlinks);
        assert_eq!(config.transport.port, 7667);
    }

    #[test]
    fn test_resolve_rejects_missing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.scripts.dir = temp_dir.path().join("missing");

        let result = config.resolve();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_resolve_keeps_explicit_version() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.scripts.dir = temp_dir.path().to_path_buf();
        config.scripts.version = "v1.2.3".to_string();

        let config = config.resolve().unwrap();
        assert_eq!(config.scripts.version, "v1.2.3");
        assert!(config.scripts.dir.is_absolute());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
