//! Placeholder tokens and literal substitution.
//!
//! Only the enumerated tokens are ever replaced. Replacement is a single
//! left-to-right pass, so a bound value that happens to contain another
//! token's text is emitted as-is and never substituted again.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Hardcoded tool-list line carried by installer templates that predate
/// the `<TOOL_LIST>` token.
pub const LEGACY_TOOL_LIST_LINE: &str = r#"TOOLS="nmap curl curl-openssl column socat""#;

/// The fixed set of substitutable tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    /// Tool the installer is generated for (`all` for the bundle).
    ToolName,
    /// Server base URL, installer-template spelling.
    ServerUrl,
    /// Server base URL, script spelling.
    BaseUrl,
    /// Served tools version.
    Version,
    /// Space-joined display names of every discovered tool.
    ToolList,
}

impl Placeholder {
    /// Every placeholder, in declaration order.
    pub const ALL: [Placeholder; 5] = [
        Placeholder::ToolName,
        Placeholder::ServerUrl,
        Placeholder::BaseUrl,
        Placeholder::Version,
        Placeholder::ToolList,
    ];

    /// Literal token text as it appears in scripts.
    pub const fn token(self) -> &'static str {
        match self {
            Placeholder::ToolName => "<TOOL_NAME>",
            Placeholder::ServerUrl => "<SERVER_URL>",
            Placeholder::BaseUrl => "<BASE_URL>",
            Placeholder::Version => "<GIT_COMMIT_SHA>",
            Placeholder::ToolList => "<TOOL_LIST>",
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Token → value mapping for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<Placeholder, String>,
}

impl Bindings {
    /// Create an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `placeholder` to `value`, builder style.
    pub fn with(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        self.set(placeholder, value);
        self
    }

    /// Bind `placeholder` to `value`, replacing any previous binding.
    pub fn set(&mut self, placeholder: Placeholder, value: impl Into<String>) {
        self.values.insert(placeholder, value.into());
    }

    /// Value bound to `placeholder`, if any.
    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace every bound token in `content`.
    ///
    /// Unbound tokens and any other text are left untouched.
    pub fn substitute(&self, content: &str) -> String {
        if self.is_empty() {
            return content.to_string();
        }

        let mut out = String::with_capacity(content.len());
        let mut rest = content;

        while let Some(start) = rest.find('<') {
            out.push_str(&rest[..start]);
            let candidate = &rest[start..];

            match self
                .values
                .iter()
                .find(|(placeholder, _)| candidate.starts_with(placeholder.token()))
            {
                Some((placeholder, value)) => {
                    out.push_str(value);
                    rest = &candidate[placeholder.token().len()..];
                }
                None => {
                    out.push('<');
                    rest = &candidate[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Replace every token bound in `bindings`.
pub fn substitute(content: &str, bindings: &Bindings) -> String {
    bindings.substitute(content)
}

/// Turn the legacy hardcoded tool list into a `<TOOL_LIST>` token, so old
/// and new installer templates both receive the discovered list.
pub fn upgrade_legacy_tool_list(template: &str) -> Cow<'_, str> {
    if template.contains(LEGACY_TOOL_LIST_LINE) {
        let line = format!("TOOLS=\"{}\"", Placeholder::ToolList.token());
        Cow::Owned(template.replace(LEGACY_TOOL_LIST_LINE, &line))
    } else {
        Cow::Borrowed(template)
    }
}
