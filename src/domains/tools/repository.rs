//! Tool repository - discovery and reads over the script directory.
//!
//! Nothing is cached: every call rescans the directory so scripts can be
//! edited, added or removed without restarting the server.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

use super::error::ToolError;
use super::metadata::{ScriptMetadata, HEADER_SCAN_LINES};
use super::resolver::NameResolver;
use crate::core::config::ScriptsConfig;

/// File names never served as tools, even when they look like scripts.
pub const DENYLIST: &[&str] = &["health", "help", "list", "install", "installer", "favicon.ico"];

/// Interpreter marker a tool's first line must start with.
const SHEBANG: &str = "#!";

/// A discovered tool with its header metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEntry {
    /// Canonical on-disk filename.
    pub name: String,
    /// Name shown to users (prefix stripped).
    pub display_name: String,
    pub metadata: ScriptMetadata,
}

/// Read-only view over the script directory.
#[derive(Debug, Clone)]
pub struct ToolRepository {
    root: PathBuf,
    prefix: String,
}

impl ToolRepository {
    /// Create a repository rooted at `root` using the naming `prefix`.
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    /// Create a repository from the scripts configuration.
    pub fn from_config(config: &ScriptsConfig) -> Self {
        Self::new(config.dir.clone(), config.tool_prefix.clone())
    }

    /// The script directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Name resolver bound to this repository's prefix.
    pub fn resolver(&self) -> NameResolver<'_> {
        NameResolver::new(&self.prefix)
    }

    /// Scan the directory for eligible tools, sorted by name.
    ///
    /// A tool is a regular file whose first line starts with `#!`, whose
    /// name is not hidden and not on the [`DENYLIST`]. Entries that cannot be
    /// inspected are skipped silently.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn discover(&self) -> Result<Vec<String>, ToolError> {
        let entries = fs::read_dir(&self.root).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ToolError::DirectoryMissing(self.root.clone()),
            _ => ToolError::read(&self.root, e),
        })?;

        let mut tools = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    debug!("Skipping unreadable directory entry: {}", e);
                    continue;
                }
            };

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if name.starts_with('.') || DENYLIST.contains(&name.as_str()) {
                continue;
            }

            if is_script_file(&entry.path()) {
                tools.push(name);
            }
        }

        tools.sort();
        debug!("Discovered {} tools", tools.len());
        Ok(tools)
    }

    /// Resolve a user-supplied tool identifier to its canonical filename.
    pub fn resolve(&self, requested: &str) -> Result<String, ToolError> {
        let discovered = self.discover()?;
        self.resolver()
            .resolve(requested, &discovered)
            .map(str::to_string)
            .ok_or_else(|| ToolError::not_found(requested))
    }

    /// Read a tool's full content.
    ///
    /// A file that vanished between discovery and this read is reported as
    /// not found rather than as a read fault.
    pub fn read(&self, name: &str) -> Result<String, ToolError> {
        if !is_plain_file_name(name) {
            return Err(ToolError::not_found(name));
        }

        let path = self.root.join(name);
        if !path.is_file() {
            return Err(ToolError::not_found(name));
        }

        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ToolError::not_found(name),
            _ => ToolError::read(path, e),
        })
    }

    /// Header metadata for `name`; empty when the file cannot be read.
    pub fn metadata(&self, name: &str) -> ScriptMetadata {
        if !is_plain_file_name(name) {
            return ScriptMetadata::default();
        }

        match read_header(&self.root.join(name)) {
            Ok(lines) => ScriptMetadata::from_header(name, lines),
            Err(e) => {
                debug!("No metadata for {}: {}", name, e);
                ScriptMetadata::default()
            }
        }
    }

    /// Discover every tool together with its display name and metadata.
    pub fn entries(&self) -> Result<Vec<ToolEntry>, ToolError> {
        let resolver = self.resolver();
        Ok(self
            .discover()?
            .into_iter()
            .map(|name| ToolEntry {
                display_name: resolver.display_name(&name).to_string(),
                metadata: self.metadata(&name),
                name,
            })
            .collect())
    }

    /// Prefix-stripped names of all discovered tools, in discovery order.
    ///
    /// The multiplexer (the bare prefix) is not an installable tool and is
    /// left out.
    pub fn install_names(&self) -> Result<Vec<String>, ToolError> {
        let resolver = self.resolver();
        Ok(self
            .discover()?
            .iter()
            .filter_map(|name| resolver.install_name(name))
            .map(str::to_string)
            .collect())
    }
}

/// Check whether `path` is a regular file starting with an interpreter marker.
fn is_script_file(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }

    let mut first_line = String::new();
    match File::open(path).and_then(|f| BufReader::new(f).read_line(&mut first_line)) {
        Ok(_) => first_line.trim().starts_with(SHEBANG),
        Err(e) => {
            debug!("Skipping {}: {}", path.display(), e);
            false
        }
    }
}

fn read_header(path: &Path) -> io::Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    reader.lines().take(HEADER_SCAN_LINES).collect()
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptDir;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = ScriptDir::new()
            .tool("poorcurl", "#!/bin/sh\necho curl\n")
            .tool("poorcolumn", "#!/bin/sh\necho column\n")
            .file("README.md", "# not a script\n")
            .file(".hidden", "#!/bin/sh\n")
            .file("install", "#!/bin/sh\n");

        let tools = dir.repository().discover().unwrap();

        assert_eq!(tools, vec!["poorcolumn", "poorcurl"]);
    }

    #[test]
    fn test_discover_skips_directories_and_binary_files() {
        let dir = ScriptDir::new()
            .tool("poorcurl", "#!/bin/sh\n")
            .bytes("blob", &[0xff, 0xfe, 0x00, 0x01]);
        std::fs::create_dir(dir.path().join("lib")).unwrap();

        let tools = dir.repository().discover().unwrap();

        assert_eq!(tools, vec!["poorcurl"]);
    }

    #[test]
    fn test_discover_missing_directory() {
        let repo = ToolRepository::new("/definitely/not/here", "poor");

        assert!(matches!(
            repo.discover(),
            Err(ToolError::DirectoryMissing(_))
        ));
    }

    #[test]
    fn test_resolve_and_read() {
        let dir = ScriptDir::new().tool("poorcurl", "#!/bin/sh\necho curl\n");
        let repo = dir.repository();

        let name = repo.resolve("curl").unwrap();
        assert_eq!(name, "poorcurl");
        assert_eq!(repo.read(&name).unwrap(), "#!/bin/sh\necho curl\n");

        assert!(matches!(
            repo.resolve("doesnotexist"),
            Err(ToolError::NotFound(_))
        ));
    }

    #[test]
    fn test_read_rejects_path_like_names() {
        let dir = ScriptDir::new().tool("poorcurl", "#!/bin/sh\n");
        let repo = dir.repository();

        assert!(matches!(repo.read("../etc/passwd"), Err(ToolError::NotFound(_))));
        assert!(matches!(repo.read("lib/echo.sh"), Err(ToolError::NotFound(_))));
    }

    #[test]
    fn test_metadata_best_effort() {
        let dir = ScriptDir::new().tool(
            "poorcurl",
            "#!/bin/sh\n# description: curl, but uses wget behind the scenes\n# icon: download\n",
        );
        let repo = dir.repository();

        let metadata = repo.metadata("poorcurl");
        assert_eq!(
            metadata.description.as_deref(),
            Some("curl, but uses wget behind the scenes")
        );
        assert_eq!(metadata.display_icon(), "mdi:download");

        assert_eq!(repo.metadata("non-existent-tool"), ScriptMetadata::default());
    }

    #[test]
    fn test_entries_carry_display_names() {
        let dir = ScriptDir::new()
            .tool("poor", "#!/bin/sh\n")
            .tool("poorcurl", "#!/bin/sh\n");

        let entries = dir.repository().entries().unwrap();
        let names: Vec<_> = entries
            .iter()
            .map(|e| (e.name.as_str(), e.display_name.as_str()))
            .collect();

        assert_eq!(names, vec![("poor", "poor"), ("poorcurl", "curl")]);
    }

    #[test]
    fn test_install_names_skip_multiplexer() {
        let dir = ScriptDir::new()
            .tool("poor", "#!/bin/sh\n")
            .tool("poorcurl", "#!/bin/sh\n")
            .tool("jq-lite", "#!/bin/sh\n");

        assert_eq!(dir.repository().install_names().unwrap(), vec!["jq-lite", "curl"]);
    }
}
