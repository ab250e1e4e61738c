//! Installer server and request dispatch.
//!
//! This module contains the content dispatcher: it maps one logical request
//! to a finished body by composing the tool repository, the name resolver,
//! the templating pipeline and the catalog renderer.
//!
//! ## Request Architecture
//!
//! The HTTP layer in `transport/http.rs` only parses paths, headers and the
//! `no_templating` query flag into a [`Request`] plus a [`RenderContext`].
//! Everything that touches the script directory happens here, synchronously,
//! so it can be exercised without a running server.

use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::config::Config;
use super::context::RenderContext;
use super::error::{Error, Result};
use crate::domains::catalog::{
    name_list, render_page, AssetStore, Catalog, CatalogError, ClientKind, ListFormat, FAVICON,
    INDEX_TEMPLATE, SCRIPT, STYLE_SHEET,
};
use crate::domains::templating::upgrade_legacy_tool_list;
use crate::domains::tools::ToolRepository;

/// Names that are endpoints of their own and never resolve as tools.
pub const RESERVED_NAMES: &[&str] = &["health", "list", "install", "installer"];

/// Installer template, relative to the script directory.
pub const INSTALLER_TEMPLATE: &str = "templates/tool-installer.sh";

/// Tool name bound into the bundle installer.
pub const BUNDLE_TOOL_NAME: &str = "all";

/// One logical request, independent of the HTTP surface it arrived on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// A tool script, as stored, through the pipeline.
    RawTool(String),
    /// An installer generated for one tool.
    ToolInstaller(String),
    /// An installer for every discovered tool.
    BundleInstaller,
    /// The multiplexer script.
    Installer,
    /// The root catalog.
    Catalog(ClientKind),
    /// The machine tool list.
    List(ListFormat),
    /// Usage text.
    Help,
    /// Liveness probe.
    Health,
}

impl Request {
    /// Classify a single-segment path.
    ///
    /// Any segment starting with `install` other than `installer` itself is
    /// a bundle installer request.
    pub fn from_segment(segment: &str) -> Self {
        if segment == "installer" {
            Self::Installer
        } else if segment.starts_with("install") {
            Self::BundleInstaller
        } else {
            Self::RawTool(segment.to_string())
        }
    }
}

/// Media type of a rendered body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Text,
    Json,
    Html,
}

impl MediaKind {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Json => "application/json; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
        }
    }
}

/// A rendered response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub body: String,
    pub media: MediaKind,
}

impl Output {
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            media: MediaKind::Text,
        }
    }

    pub fn html(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            media: MediaKind::Html,
        }
    }

    /// Pretty-printed JSON.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self {
            body: serde_json::to_string_pretty(value)?,
            media: MediaKind::Json,
        })
    }

    /// Single-line JSON.
    pub fn compact_json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self {
            body: serde_json::to_string(value)?,
            media: MediaKind::Json,
        })
    }
}

/// The web installer.
///
/// Holds the startup configuration and the repositories derived from it.
/// Cloning is cheap; every clone shares the same configuration.
#[derive(Debug, Clone)]
pub struct InstallerServer {
    /// Server configuration, fixed at startup.
    config: Arc<Config>,

    /// Tool scripts under the script directory.
    tools: ToolRepository,

    /// Catalog template and static files.
    assets: AssetStore,
}

impl InstallerServer {
    /// Create a new installer server with the given configuration.
    pub fn new(config: Config) -> Self {
        let tools = ToolRepository::from_config(&config.scripts);
        let assets = AssetStore::new(config.assets.dir.clone(), config.security.clone());

        Self {
            config: Arc::new(config),
            tools,
            assets,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory served under `/static`.
    pub fn static_dir(&self) -> PathBuf {
        self.assets.static_dir()
    }

    /// Render one request.
    #[instrument(skip(self, ctx), fields(server_url = %ctx.server_url()))]
    pub fn dispatch(&self, request: &Request, ctx: &RenderContext<'_>) -> Result<Output> {
        match request {
            Request::RawTool(name) => self.raw_tool(name, ctx),
            Request::ToolInstaller(name) => self.tool_installer(name, ctx),
            Request::BundleInstaller => self.bundle_installer(ctx),
            Request::Installer => self.installer(ctx),
            Request::Catalog(client) => self.catalog(*client, ctx),
            Request::List(format) => self.list(*format, ctx),
            Request::Help => self.help(ctx),
            Request::Health => Output::compact_json(&serde_json::json!({ "status": "ok" })),
        }
    }

    /// Favicon bytes.
    pub fn favicon(&self) -> Result<Vec<u8>> {
        self.assets.static_bytes(FAVICON).map_err(|e| match e {
            CatalogError::AssetMissing(_) => Error::not_found("Favicon not found"),
            other => other.into(),
        })
    }

    fn raw_tool(&self, requested: &str, ctx: &RenderContext<'_>) -> Result<Output> {
        if RESERVED_NAMES.contains(&requested) {
            return Err(Error::not_found("Reserved endpoint"));
        }

        let name = self.tools.resolve(requested)?;
        debug!("Resolved {} to {}", requested, name);

        let content = self.tools.read(&name)?;
        Ok(Output::text(ctx.pipeline(ctx.script_bindings()).render(&content)))
    }

    fn tool_installer(&self, requested: &str, ctx: &RenderContext<'_>) -> Result<Output> {
        let name = self.tools.resolve(requested)?;
        info!("Generating installer for {}", name);
        self.render_installer(&ctx.clone().with_tool(name))
    }

    fn bundle_installer(&self, ctx: &RenderContext<'_>) -> Result<Output> {
        info!("Generating bundle installer");
        self.render_installer(&ctx.clone().with_tool(BUNDLE_TOOL_NAME))
    }

    fn render_installer(&self, ctx: &RenderContext<'_>) -> Result<Output> {
        let template = self.installer_template()?;
        let tool_list = self.tools.install_names()?.join(" ");
        let pipeline = ctx.pipeline(ctx.installer_bindings(tool_list));

        let template = if pipeline.is_enabled() {
            upgrade_legacy_tool_list(&template)
        } else {
            Cow::Borrowed(template.as_str())
        };

        Ok(Output::text(pipeline.render(&template)))
    }

    /// The multiplexer script, named by the tool prefix itself.
    fn installer(&self, ctx: &RenderContext<'_>) -> Result<Output> {
        let content = self.tools.read(&self.config.scripts.tool_prefix)?;
        Ok(Output::text(ctx.pipeline(ctx.script_bindings()).render(&content)))
    }

    fn installer_template(&self) -> Result<String> {
        let path = self.config.scripts.dir.join(INSTALLER_TEMPLATE);
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::config("Tool installer template not found"),
            _ => Error::read(path, e),
        })
    }

    fn catalog(&self, client: ClientKind, ctx: &RenderContext<'_>) -> Result<Output> {
        let entries = self.tools.entries()?;
        let catalog = Catalog::new(ctx.server_url(), &entries);

        if client.is_cli() {
            return Ok(Output::text(catalog.cli_index()));
        }

        let template = self.assets.template(INDEX_TEMPLATE)?;
        let css = self.assets.static_text(STYLE_SHEET)?;
        let js = self.assets.static_text(SCRIPT)?;

        Ok(Output::html(render_page(
            &template,
            &css,
            &js,
            &catalog.html_cards(),
        )))
    }

    fn list(&self, format: ListFormat, ctx: &RenderContext<'_>) -> Result<Output> {
        match format {
            ListFormat::Text => Ok(Output::text(name_list(&self.tools.discover()?))),
            ListFormat::Json => {
                let entries = self.tools.entries()?;
                let listing = Catalog::new(ctx.server_url(), &entries).listing(ctx.version());
                Output::json(&listing)
            }
        }
    }

    fn help(&self, ctx: &RenderContext<'_>) -> Result<Output> {
        let entries = self.tools.entries()?;
        Ok(Output::text(Catalog::new(ctx.server_url(), &entries).help()))
    }
}
