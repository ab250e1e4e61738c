//! poor-tools Web Installer Library
//!
//! This crate serves a directory of self-contained shell "tools" over HTTP,
//! generates installer scripts on demand and renders a browser catalog.
//!
//! # Architecture
//!
//! The server is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling,
//!   path confinement, the content dispatcher and the HTTP transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Script discovery, header metadata and tool-name resolution
//!   - **templating**: Include expansion and placeholder substitution
//!   - **catalog**: Plain-text, JSON and HTML tool listings
//!
//! # Example
//!
//! ```rust,no_run
//! use poor_installer_web::core::{Config, InstallerServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = InstallerServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types for convenience
pub use core::{Config, Error, InstallerServer, Result};
