//! Tool-name resolution.
//!
//! Users may ask for a tool with or without the naming-convention prefix, so
//! `/curl` and `/poorcurl` land on the same file. Resolution is a strict-order
//! search over the discovered names with no fuzzy fallback.

/// Maps user-facing tool identifiers to canonical on-disk filenames.
#[derive(Debug, Clone, Copy)]
pub struct NameResolver<'a> {
    prefix: &'a str,
}

impl<'a> NameResolver<'a> {
    /// Create a resolver for the given naming prefix (e.g. `poor`).
    pub fn new(prefix: &'a str) -> Self {
        Self { prefix }
    }

    /// Resolve `requested` against `discovered`.
    ///
    /// Order: exact match, then the prefixed name, then (when the request
    /// already carries the prefix) the bare name or its re-prefixed form.
    pub fn resolve<'d>(&self, requested: &str, discovered: &'d [String]) -> Option<&'d str> {
        if requested.is_empty() {
            return None;
        }

        if let Some(hit) = find(discovered, requested) {
            return Some(hit);
        }

        if self.prefix.is_empty() {
            return None;
        }

        let prefixed = format!("{}{}", self.prefix, requested);
        if let Some(hit) = find(discovered, &prefixed) {
            return Some(hit);
        }

        let bare = requested.strip_prefix(self.prefix)?;
        if bare.is_empty() {
            return None;
        }
        let reprefixed = format!("{}{}", self.prefix, bare);
        discovered
            .iter()
            .map(String::as_str)
            .find(|tool| *tool == bare || *tool == reprefixed)
    }

    /// User-facing name: the prefix is dropped unless the name is the bare prefix.
    pub fn display_name<'n>(&self, name: &'n str) -> &'n str {
        match name.strip_prefix(self.prefix) {
            Some(bare) if !bare.is_empty() && !self.prefix.is_empty() => bare,
            _ => name,
        }
    }

    /// Name as listed in the bundle installer: the prefix is always dropped,
    /// and the bare prefix itself yields nothing.
    pub fn install_name<'n>(&self, name: &'n str) -> Option<&'n str> {
        let bare = name.strip_prefix(self.prefix).unwrap_or(name);
        (!bare.is_empty()).then_some(bare)
    }
}

fn find<'d>(discovered: &'d [String], name: &str) -> Option<&'d str> {
    discovered
        .iter()
        .map(String::as_str)
        .find(|tool| *tool == name)
}
