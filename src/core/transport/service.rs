//! Transport service - runs the installer behind its HTTP listener.

use tracing::info;

use super::http::HttpTransport;
use super::{TransportConfig, TransportResult};
use crate::core::InstallerServer;

/// Transport service - manages the transport layer for the installer.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Create a transport service from environment variables.
    pub fn from_env() -> Self {
        Self::new(TransportConfig::from_env())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Start serving `server`.
    ///
    /// This method blocks until the transport is shut down.
    pub async fn run(self, server: InstallerServer) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());
        HttpTransport::new(self.config).run(server).await
    }
}
