//! Templating domain module.
//!
//! Script content passes through two phases before it is served: include
//! directives are expanded, then placeholder tokens are substituted. Both
//! phases are governed by one switch; a request with templating disabled
//! gets the file exactly as it is on disk.
//!
//! ## Architecture
//!
//! - `include.rs` - Include directive parsing and one-pass expansion
//! - `placeholder.rs` - Token set and literal substitution

mod include;
mod placeholder;

pub use include::{IncludeDirective, IncludeResolver, INCLUDE_FILE_MARKER, TEMPLATE_MARKER};
pub use placeholder::{substitute, upgrade_legacy_tool_list, Bindings, Placeholder};

/// The include + substitution pipeline for one render.
#[derive(Debug, Clone)]
pub struct Pipeline<'a> {
    includes: IncludeResolver<'a>,
    bindings: Bindings,
    enabled: bool,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline. When `enabled` is false, [`Pipeline::render`]
    /// returns its input untouched.
    pub fn new(includes: IncludeResolver<'a>, bindings: Bindings, enabled: bool) -> Self {
        Self {
            includes,
            bindings,
            enabled,
        }
    }

    /// Whether includes and tokens are processed at all.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Expand includes, then substitute tokens.
    ///
    /// Tokens inside inlined fragments are substituted too.
    pub fn render(&self, content: &str) -> String {
        if !self.enabled {
            return content.to_string();
        }

        let expanded = self.includes.expand(content);
        self.bindings.substitute(&expanded)
    }
}
