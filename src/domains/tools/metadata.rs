//! Script header metadata.
//!
//! Tools describe themselves in the comment block at the top of the file:
//!
//! ```text
//! #!/bin/sh
//! # description: curl, but uses wget behind the scenes
//! # icon: mdi:download
//! # version: <GIT_COMMIT_SHA>
//! ```
//!
//! or with the inline form `# poorcurl — curl, but uses wget behind the scenes`.

use serde::Serialize;

use crate::domains::templating::Placeholder;

/// Maximum number of leading lines inspected for header metadata.
pub const HEADER_SCAN_LINES: usize = 10;

/// Icon shown on catalog cards for tools that declare none.
pub const DEFAULT_ICON: &str = "mdi:wrench";

const ICON_NAMESPACE: &str = "mdi:";

/// Metadata declared in a script's header comments.
///
/// Every field is optional; an unreadable or header-less script yields
/// [`ScriptMetadata::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScriptMetadata {
    pub description: Option<String>,
    pub icon: Option<String>,
    /// Pinned version. `None` means the script follows the served tools version.
    pub version: Option<String>,
}

impl ScriptMetadata {
    /// Parse the header of the script called `name`.
    ///
    /// Scanning covers at most [`HEADER_SCAN_LINES`] lines and stops at the
    /// first line that is neither blank nor a comment.
    pub fn from_header<I, S>(name: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut metadata = Self::default();

        for line in lines.into_iter().take(HEADER_SCAN_LINES) {
            let line = line.as_ref().trim();

            if let Some(rest) = line.strip_prefix("# description:") {
                let desc = rest.trim();
                let desc = desc.strip_prefix(':').map(str::trim).unwrap_or(desc);
                metadata.description = non_empty(desc);
            } else if let Some(rest) = line.strip_prefix("# icon:") {
                metadata.icon = non_empty(rest.trim());
            } else if let Some(rest) = line.strip_prefix("# version:") {
                let version = rest.trim();
                metadata.version = if version == Placeholder::Version.token() {
                    None
                } else {
                    non_empty(version)
                };
            } else if let Some(desc) = inline_description(name, line) {
                if metadata.description.is_none() {
                    metadata.description = Some(desc);
                }
            } else if !line.is_empty() && !line.starts_with('#') {
                break;
            }
        }

        metadata
    }

    /// Description, or an empty string.
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Icon normalized for rendering: namespaced, with a default.
    pub fn display_icon(&self) -> String {
        match self.icon.as_deref() {
            Some(icon) if icon.starts_with(ICON_NAMESPACE) => icon.to_string(),
            Some(icon) => format!("{ICON_NAMESPACE}{icon}"),
            None => DEFAULT_ICON.to_string(),
        }
    }

    /// Pinned version, falling back to `current`.
    pub fn version_or<'a>(&'a self, current: &'a str) -> &'a str {
        self.version.as_deref().unwrap_or(current)
    }
}

/// `# <name> — text` or `# <name> - text`.
fn inline_description(name: &str, line: &str) -> Option<String> {
    let rest = line.strip_prefix("# ")?.strip_prefix(name)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let desc = rest
        .strip_prefix('—')
        .or_else(|| rest.strip_prefix('-'))?
        .trim();
    non_empty(desc)
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
