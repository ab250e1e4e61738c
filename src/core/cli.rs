//! Command-line flags.
//!
//! Flags override the environment, which overrides `.env` and the built-in
//! defaults. The bind flags are argv-only: `BIND_HOST` and `BIND_PORT` are
//! read by the transport config, where an unparsable port falls back to the
//! default instead of aborting startup.

use clap::Parser;
use std::path::PathBuf;

use super::config::Config;

/// Serve poor-tools scripts, installers and a catalog over HTTP.
#[derive(Debug, Default, Parser)]
#[command(name = "poor-installer-web", author, version, about, long_about = None)]
pub struct Cli {
    /// Address to bind.
    #[arg(long)]
    pub bind_host: Option<String>,

    /// Port to bind.
    #[arg(long)]
    pub bind_port: Option<u16>,

    /// Directory holding the tool scripts.
    #[arg(long, env = "POOR_SCRIPT_DIR")]
    pub script_dir: Option<PathBuf>,

    /// Directory holding `templates/` and `static/` for the browser catalog.
    #[arg(long, env = "POOR_ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,
}

impl Cli {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(self, config: &mut Config) {
        if let Some(host) = self.bind_host {
            config.transport.host = host;
        }
        if let Some(port) = self.bind_port {
            config.transport.port = port;
        }
        if let Some(dir) = self.script_dir {
            config.scripts.dir = dir;
        }
        if let Some(dir) = self.assets_dir {
            config.assets.dir = dir;
        }
    }
}
