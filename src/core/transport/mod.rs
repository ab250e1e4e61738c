//! Transport layer for the web installer.
//!
//! The installer is served over plain HTTP by an axum router. The transport
//! owns the listener, the route table and the mapping of errors to status
//! codes; rendering itself is delegated to [`InstallerServer`].
//!
//! [`InstallerServer`]: crate::core::InstallerServer

mod config;
mod error;
mod service;

pub mod http;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;
