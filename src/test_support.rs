//! Fixture script directories for unit tests.

use std::fs;
use std::path::Path;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

use crate::core::config::{Config, SecurityConfig};
use crate::domains::tools::ToolRepository;

/// Serialize tests that mutate process-global state (env vars).
pub(crate) fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

pub(crate) const TEST_VERSION: &str = "abc12345";

pub(crate) const INSTALLER_TEMPLATE: &str = r#"#!/bin/sh
# <TOOL_NAME> installer, generated by <SERVER_URL>
set -eu

# INCLUDE_FILE: lib/echo.sh
. lib/has_command.sh # <TEMPLATE>

TOOL="<TOOL_NAME>"
TOOLS="<TOOL_LIST>"
DEST="${HOME}/.local/bin"

usage() {
  echo "usage: install [--dest DIR]"
}

if [ "$TOOL" = "all" ]; then
  echo_success "Installing all poor-tools: $TOOLS"
fi
"#;

pub(crate) const INDEX_TEMPLATE: &str = "<html><head><style>{{ css_content }}</style></head>\
<body><h1>poor-tools</h1><p>Portable shell tools</p>{{ commands_html }}\
<main>{{ tools_cards_html }}</main><script>{{ js_content }}</script></body></html>";

/// A temporary script directory populated through a builder.
pub(crate) struct ScriptDir {
    dir: TempDir,
    pub security: SecurityConfig,
}

impl ScriptDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            security: SecurityConfig::default(),
        }
    }

    /// A directory shaped like a real poor-tools checkout, with catalog assets.
    pub fn fixture() -> Self {
        Self::new()
            .tool(
                "poor",
                "#!/bin/sh\n# description: poor-tools multiplexer\nDEFAULT_BASE_URL=\"<BASE_URL>\"\nVERSION=\"<GIT_COMMIT_SHA>\"\n",
            )
            .tool(
                "poorcurl",
                "#!/bin/sh\n# description: curl, but uses wget behind the scenes\n# icon: mdi:download\n# INCLUDE_FILE: lib/echo.sh\necho \"curl-like wrapper\"\n",
            )
            .tool(
                "poorcolumn",
                "#!/bin/sh\n# poorcolumn — minimal column(1) clone\n# icon: table\nawk '{ print }'\n",
            )
            .file("lib/echo.sh", "echo_success() { printf '%s\\n' \"$*\"; }\n")
            .file("lib/has_command.sh", "has_command() { command -v \"$1\" >/dev/null 2>&1; }\n")
            .file("templates/tool-installer.sh", INSTALLER_TEMPLATE)
            .file(".assets/templates/index.html", INDEX_TEMPLATE)
            .file(".assets/static/style.css", "body { margin: 0; }")
            .file(".assets/static/script.js", "function copyToClipboard() {}")
    }

    /// Write an executable-looking tool at the top level.
    pub fn tool(self, name: &str, content: &str) -> Self {
        self.file(name, content)
    }

    /// Write a file, creating parent directories as needed.
    pub fn file(self, relative: &str, content: &str) -> Self {
        self.bytes(relative, content.as_bytes())
    }

    pub fn bytes(self, relative: &str, content: &[u8]) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn repository(&self) -> ToolRepository {
        ToolRepository::new(self.path(), "poor")
    }

    /// Configuration serving this directory, with assets under `.assets`.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.scripts.dir = self.path().to_path_buf();
        config.scripts.version = TEST_VERSION.to_string();
        config.assets.dir = self.path().join(".assets");
        config.security = self.security.clone();
        config
    }
}
