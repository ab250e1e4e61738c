//! Tools version resolution.
//!
//! The version stamped into scripts comes from `POOR_TOOLS_VERSION` when set
//! (containers, packages), else from the git checkout holding the scripts,
//! else the literal `unknown`.

use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Environment variable carrying an externally supplied version.
pub const VERSION_ENV: &str = "POOR_TOOLS_VERSION";

/// Version reported when neither the environment nor git provide one.
pub const UNKNOWN_VERSION: &str = "unknown";

/// Resolve the tools version for the given script directory.
pub fn resolve_tools_version(script_dir: &Path) -> String {
    if let Some(version) = version_from_env() {
        return version;
    }

    if let Some(sha) = git_short_sha(script_dir) {
        return sha;
    }

    UNKNOWN_VERSION.to_string()
}

fn version_from_env() -> Option<String> {
    std::env::var(VERSION_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Short (8 character) commit SHA of the checkout containing `dir`.
fn git_short_sha(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .current_dir(dir)
        .output()
        .map_err(|e| debug!("git not available: {}", e))
        .ok()?;

    if !output.status.success() {
        debug!("{} is not inside a git checkout", dir.display());
        return None;
    }

    let sha = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}
