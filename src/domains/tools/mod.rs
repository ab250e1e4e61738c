//! Tools domain module.
//!
//! A tool is a standalone script in the script directory. This domain finds
//! them, reads their header metadata and maps user-facing names onto
//! canonical filenames.
//!
//! ## Architecture
//!
//! - `repository.rs` - Directory scanning and file reads
//! - `metadata.rs` - Header-comment metadata parsing
//! - `resolver.rs` - Prefix-tolerant tool-name resolution
//! - `error.rs` - Tool-specific error types

mod error;
mod metadata;
mod repository;
mod resolver;

pub use error::ToolError;
pub use metadata::{ScriptMetadata, DEFAULT_ICON, HEADER_SCAN_LINES};
pub use repository::{ToolEntry, ToolRepository, DENYLIST};
pub use resolver::NameResolver;
