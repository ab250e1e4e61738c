//! Include directives and their expansion.
//!
//! Two directive spellings are recognized, each confined to a single line:
//!
//! ```text
//! # INCLUDE_FILE: lib/echo.sh
//! . lib/echo.sh # <TEMPLATE>
//! source lib/echo.sh # <TEMPLATE>
//! ```
//!
//! Expansion is one pass over the top-level content. Inlined fragments are
//! emitted verbatim and never rescanned, so nested directives stay as they
//! are and include cycles cannot occur.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::core::config::SecurityConfig;
use crate::core::security::resolve_within;

/// Prefix of the full-line comment directive.
pub const INCLUDE_FILE_MARKER: &str = "# INCLUDE_FILE:";

/// Trailing marker of the `source`/`.` directive.
pub const TEMPLATE_MARKER: &str = "# <TEMPLATE>";

/// A parsed include directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeDirective<'a> {
    /// `# INCLUDE_FILE: <path>` as the whole trimmed line.
    Comment { path: &'a str },
    /// `source <path> # <TEMPLATE>` or `. <path> # <TEMPLATE>`.
    Source { path: &'a str },
}

impl<'a> IncludeDirective<'a> {
    /// Recognize a directive on `line`, if there is one.
    pub fn parse(line: &'a str) -> Option<Self> {
        Self::parse_comment(line).or_else(|| Self::parse_source(line))
    }

    fn parse_comment(line: &'a str) -> Option<Self> {
        let path = line.trim().strip_prefix(INCLUDE_FILE_MARKER)?.trim();
        (!path.is_empty()).then_some(Self::Comment { path })
    }

    fn parse_source(line: &'a str) -> Option<Self> {
        let marker = line.find(TEMPLATE_MARKER)?;
        let body = line[..marker].trim();
        let path = body
            .strip_prefix("source ")
            .or_else(|| body.strip_prefix(". "))?
            .trim();
        (!path.is_empty()).then_some(Self::Source { path })
    }

    /// Path of the referenced fragment, relative to the script directory.
    pub fn path(&self) -> &'a str {
        match self {
            Self::Comment { path } | Self::Source { path } => path,
        }
    }
}

/// Expands include directives against a script directory.
#[derive(Debug, Clone, Copy)]
pub struct IncludeResolver<'a> {
    root: &'a Path,
    security: &'a SecurityConfig,
    markers: bool,
}

impl<'a> IncludeResolver<'a> {
    /// Create a resolver reading fragments below `root`.
    pub fn new(root: &'a Path, security: &'a SecurityConfig) -> Self {
        Self {
            root,
            security,
            markers: false,
        }
    }

    /// Wrap inlined fragments with `# BEGIN INCLUDE` / `# END INCLUDE` lines.
    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    /// Expand every directive line of `content`.
    ///
    /// A directive whose target is missing, unreadable or outside the root is
    /// kept verbatim. A directive whose target is empty is dropped.
    pub fn expand(&self, content: &str) -> String {
        let mut lines: Vec<Cow<'_, str>> = Vec::new();

        for line in content.split('\n') {
            let Some(directive) = IncludeDirective::parse(line) else {
                lines.push(Cow::Borrowed(line));
                continue;
            };

            let path = directive.path();
            match self.load(path) {
                None => lines.push(Cow::Borrowed(line)),
                Some(fragment) if fragment.is_empty() => {}
                Some(fragment) => {
                    if self.markers {
                        lines.push(Cow::Owned(format!("# BEGIN INCLUDE: {path}")));
                    }
                    lines.push(Cow::Owned(fragment));
                    if self.markers {
                        lines.push(Cow::Owned(format!("# END INCLUDE: {path}")));
                    }
                }
            }
        }

        lines.join("\n")
    }

    /// Fragment content with trailing whitespace trimmed, or `None` when it
    /// cannot be included.
    fn load(&self, path: &str) -> Option<String> {
        let file = match resolve_within(self.root, path, self.security) {
            Ok(file) => file,
            Err(e) => {
                debug!("Keeping include directive for {}: {}", path, e);
                return None;
            }
        };

        match fs::read_to_string(&file) {
            Ok(content) => Some(content.trim_end().to_string()),
            Err(e) => {
                debug!("Keeping include directive for {}: {}", path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptDir;

    #[test]
    fn test_parse_comment_directive() {
        assert_eq!(
            IncludeDirective::parse("   # INCLUDE_FILE:   lib/echo.sh  "),
            Some(IncludeDirective::Comment {
                path: "lib/echo.sh"
            })
        );
        assert_eq!(IncludeDirective::parse("# INCLUDE_FILE:"), None);
        assert_eq!(IncludeDirective::parse("echo '# INCLUDE_FILE: x'"), None);
    }

    #[test]
    fn test_parse_source_directive() {
        assert_eq!(
            IncludeDirective::parse("source lib/echo.sh # <TEMPLATE>"),
            Some(IncludeDirective::Source {
                path: "lib/echo.sh"
            })
        );
        assert_eq!(
            IncludeDirective::parse("  . lib/has_command.sh  # <TEMPLATE>"),
            Some(IncludeDirective::Source {
                path: "lib/has_command.sh"
            })
        );
        assert_eq!(IncludeDirective::parse("echo hi # <TEMPLATE>"), None);
        assert_eq!(IncludeDirective::parse(". lib/echo.sh"), None);
    }

    #[test]
    fn test_expand_comment_directive() {
        let dir = ScriptDir::new().file("lib/echo.sh", "echo_ok() { echo ECHO_OK; }\n\n");
        let resolver = IncludeResolver::new(dir.path(), &dir.security);

        let result = resolver.expand("#!/bin/sh\n# INCLUDE_FILE: lib/echo.sh\necho_ok\n");

        assert_eq!(result, "#!/bin/sh\necho_ok() { echo ECHO_OK; }\necho_ok\n");
        assert!(!result.contains("INCLUDE_FILE"));
    }

    #[test]
    fn test_expand_source_directives() {
        let dir = ScriptDir::new()
            .file("lib/echo.sh", "ECHO_OK=1")
            .file("lib/has_command.sh", "has_command() { :; }");
        let resolver = IncludeResolver::new(dir.path(), &dir.security);

        let result = resolver
            .expand("source lib/echo.sh # <TEMPLATE>\n. lib/has_command.sh # <TEMPLATE>\nmain");

        assert_eq!(result, "ECHO_OK=1\nhas_command() { :; }\nmain");
    }

    #[test]
    fn test_missing_include_keeps_line() {
        let dir = ScriptDir::new();
        let resolver = IncludeResolver::new(dir.path(), &dir.security);
        let content = "a\n# INCLUDE_FILE: lib/missing.sh\n. lib/gone.sh # <TEMPLATE>\nb";

        assert_eq!(resolver.expand(content), content);
    }

    #[test]
    fn test_unreadable_include_keeps_line() {
        let dir = ScriptDir::new().bytes("lib/binary.sh", b"\xff\xfe\x00");
        std::fs::create_dir_all(dir.path().join("lib/dir")).unwrap();
        let resolver = IncludeResolver::new(dir.path(), &dir.security);
        let content =
            "a\n# INCLUDE_FILE: lib/binary.sh\n# INCLUDE_FILE: lib/dir\n. lib/dir # <TEMPLATE>\nb";

        assert_eq!(resolver.expand(content), content);
    }

    #[test]
    fn test_include_outside_root_keeps_line() {
        let outside = ScriptDir::new().file("secret.sh", "SECRET=1");
        let dir = ScriptDir::new();
        let resolver = IncludeResolver::new(dir.path(), &dir.security);
        let line = format!("# INCLUDE_FILE: {}", outside.path().join("secret.sh").display());

        assert_eq!(resolver.expand(&line), line);
        assert_eq!(
            resolver.expand("# INCLUDE_FILE: ../secret.sh"),
            "# INCLUDE_FILE: ../secret.sh"
        );
    }

    #[test]
    fn test_empty_include_drops_line() {
        let dir = ScriptDir::new().file("lib/empty.sh", "  \n\n");
        let resolver = IncludeResolver::new(dir.path(), &dir.security);

        let result = resolver.expand("a\n# INCLUDE_FILE: lib/empty.sh\n# INCLUDE_FILE: lib/empty.sh\nb");

        assert_eq!(result, "a\nb");
    }

    #[test]
    fn test_nested_directives_are_not_expanded() {
        let dir = ScriptDir::new()
            .file("lib/outer.sh", "OUTER=1\n# INCLUDE_FILE: lib/inner.sh")
            .file("lib/inner.sh", "INNER=1");
        let resolver = IncludeResolver::new(dir.path(), &dir.security);

        let result = resolver.expand("# INCLUDE_FILE: lib/outer.sh");

        assert_eq!(result, "OUTER=1\n# INCLUDE_FILE: lib/inner.sh");
    }

    #[test]
    fn test_markers_wrap_fragment() {
        let dir = ScriptDir::new().file("lib/echo.sh", "ECHO_OK=1\n");
        let resolver = IncludeResolver::new(dir.path(), &dir.security).with_markers(true);

        let result = resolver.expand("# INCLUDE_FILE: lib/echo.sh");

        assert_eq!(
            result,
            "# BEGIN INCLUDE: lib/echo.sh\nECHO_OK=1\n# END INCLUDE: lib/echo.sh"
        );
    }

    #[test]
    fn test_expand_is_identity_without_directives() {
        let dir = ScriptDir::new();
        let resolver = IncludeResolver::new(dir.path(), &dir.security);
        let content = "#!/bin/sh\r\n# just a comment\n\nsource ./env.sh\n";

        assert_eq!(resolver.expand(content), content);
    }
}
