//! Per-request render context.
//!
//! Everything a render needs that comes from the request rather than from
//! configuration: the inferred server URL, the templating switch and the
//! canonical tool name once resolution has happened.

use http::HeaderMap;
use std::path::Path;

use super::config::Config;
use crate::domains::templating::{Bindings, IncludeResolver, Pipeline, Placeholder};

/// Host used when the request carries no `Host` header.
pub const DEFAULT_HOST: &str = "localhost:7667";

/// Query value that turns templating off.
const NO_TEMPLATING: &str = "1";

/// Ephemeral state for one request. Never shared across requests.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    config: &'a Config,
    server_url: String,
    templating: bool,
    tool_name: Option<String>,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, server_url: impl Into<String>, templating: bool) -> Self {
        Self {
            config,
            server_url: server_url.into(),
            templating,
            tool_name: None,
        }
    }

    /// Build a context from request headers and the `no_templating` query value.
    pub fn from_request(
        config: &'a Config,
        headers: &HeaderMap,
        scheme: Option<&str>,
        no_templating: Option<&str>,
    ) -> Self {
        Self::new(
            config,
            server_url(headers, scheme),
            templating_enabled(no_templating),
        )
    }

    /// Attach the canonical tool name.
    pub fn with_tool(mut self, name: impl Into<String>) -> Self {
        self.tool_name = Some(name.into());
        self
    }

    /// Root that include paths resolve against.
    pub fn base_dir(&self) -> &'a Path {
        &self.config.scripts.dir
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn version(&self) -> &str {
        &self.config.scripts.version
    }

    pub fn tool_name(&self) -> Option<&str> {
        self.tool_name.as_deref()
    }

    /// Bindings for served scripts: base URL and version only.
    pub fn script_bindings(&self) -> Bindings {
        Bindings::new()
            .with(Placeholder::BaseUrl, &self.server_url)
            .with(Placeholder::Version, self.version())
    }

    /// Bindings for installer templates. `<TOOL_NAME>` is bound only once a
    /// tool is attached.
    pub fn installer_bindings(&self, tool_list: impl Into<String>) -> Bindings {
        let mut bindings = Bindings::new()
            .with(Placeholder::ServerUrl, &self.server_url)
            .with(Placeholder::Version, self.version())
            .with(Placeholder::ToolList, tool_list);
        if let Some(name) = self.tool_name() {
            bindings.set(Placeholder::ToolName, name);
        }
        bindings
    }

    /// Include resolver rooted at the script directory.
    pub fn includes(&self) -> IncludeResolver<'a> {
        IncludeResolver::new(self.base_dir(), &self.config.security)
            .with_markers(self.config.scripts.include_markers)
    }

    /// The include + substitution pipeline for this request.
    pub fn pipeline(&self, bindings: Bindings) -> Pipeline<'a> {
        Pipeline::new(self.includes(), bindings, self.templating)
    }
}

/// Infer `scheme://host` for links embedded in generated content.
///
/// `X-Forwarded-Proto` takes precedence, then `X-Forwarded-Ssl: on`, then the
/// request's own scheme. Plain HTTP is the fallback.
pub fn server_url(headers: &HeaderMap, scheme: Option<&str>) -> String {
    let host = header(headers, "host").unwrap_or(DEFAULT_HOST);

    let scheme = if let Some(proto) = header(headers, "x-forwarded-proto") {
        let proto = proto.split(',').next().unwrap_or_default().trim();
        if proto.eq_ignore_ascii_case("https") {
            "https"
        } else {
            "http"
        }
    } else if let Some(ssl) = header(headers, "x-forwarded-ssl") {
        if ssl.trim().eq_ignore_ascii_case("on") {
            "https"
        } else {
            "http"
        }
    } else if scheme.is_some_and(|s| s.eq_ignore_ascii_case("https")) {
        "https"
    } else {
        "http"
    };

    format!("{scheme}://{host}")
}

/// Whether a `no_templating` query value leaves templating on.
pub fn templating_enabled(no_templating: Option<&str>) -> bool {
    no_templating != Some(NO_TEMPLATING)
}

fn header<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
