use std::io;
use std::path::{Path, PathBuf};

use crate::core::config::SecurityConfig;

/// Errors that can occur during path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Symlink '{path}' is not allowed")]
    SymlinkRejected { path: PathBuf },

    #[error("Cannot canonicalize path '{path}': {error}")]
    CannotCanonicalize { path: PathBuf, error: io::Error },

    #[error("Path does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

/// Resolves `relative` against `root` and checks it stays inside `root`.
///
/// This function performs the following checks:
/// 1. Joins the path onto the root (an absolute input replaces the root and
///    is then rejected by the containment check)
/// 2. Rejects symlinks outright when the configuration disallows them
/// 3. Canonicalizes both sides to resolve `.`, `..` and symlinks
/// 4. Ensures the canonical path is within the canonical root
///
/// # Returns
///
/// * `Ok(PathBuf)` - The canonicalized, validated path
/// * `Err(PathSecurityError)` - If validation fails
///
/// # Examples
///
/// ```rust,ignore
/// let fragment = resolve_within(&config.scripts.dir, "lib/echo.sh", &config.security)?;
/// ```
pub fn resolve_within(
    root: &Path,
    relative: &str,
    security: &SecurityConfig,
) -> Result<PathBuf, PathSecurityError> {
    let path = root.join(relative);

    // symlink_metadata so dangling links are reported as links, not as missing
    let metadata = path
        .symlink_metadata()
        .map_err(|e| not_found_or_io(&path, e))?;

    if metadata.file_type().is_symlink() && !security.allow_symlinks {
        return Err(PathSecurityError::SymlinkRejected { path });
    }

    let canonical_root = root.canonicalize().map_err(|e| PathSecurityError::IoError {
        path: root.to_path_buf(),
        error: e,
    })?;

    let canonical_path = path.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PathSecurityError::PathNotFound { path: path.clone() }
        } else {
            PathSecurityError::CannotCanonicalize {
                path: path.clone(),
                error: e,
            }
        }
    })?;

    if !is_within_root(&canonical_path, &canonical_root) {
        return Err(PathSecurityError::OutsideRootDirectory {
            path: canonical_path,
            root: canonical_root,
        });
    }

    Ok(canonical_path)
}

/// Checks if a path is within (or equal to) a root directory
fn is_within_root(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

fn not_found_or_io(path: &Path, error: io::Error) -> PathSecurityError {
    if error.kind() == io::ErrorKind::NotFound {
        PathSecurityError::PathNotFound {
            path: path.to_path_buf(),
        }
    } else {
        PathSecurityError::IoError {
            path: path.to_path_buf(),
            error,
        }
    }
}
