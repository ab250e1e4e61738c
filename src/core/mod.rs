//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the web
//! installer, including error handling, configuration, path confinement, the
//! content dispatcher and the HTTP transport.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod security;
pub mod server;
pub mod transport;
pub mod version;

pub use cli::Cli;
pub use config::Config;
pub use context::RenderContext;
pub use error::{Error, Result};
pub use security::{resolve_within, PathSecurityError};
pub use server::{InstallerServer, Output, Request};
pub use transport::{TransportConfig, TransportService};
