//! Catalog domain module.
//!
//! Interchangeable views of the discovered tools. Command-line clients get
//! plain text, machines get JSON and browsers get an HTML page of cards.
//!
//! ## Architecture
//!
//! - `client.rs` - CLI-vs-browser classification and `Accept` negotiation
//! - `render.rs` - Text, JSON and HTML renderers
//! - `assets.rs` - Page template and static file loading
//! - `error.rs` - Catalog-specific error types

mod assets;
mod client;
mod error;
mod render;

pub use assets::{AssetStore, FAVICON, INDEX_TEMPLATE, SCRIPT, STYLE_SHEET};
pub use client::{ClientKind, ListFormat};
pub use error::CatalogError;
pub use render::{name_list, render_page, Catalog, ToolListing, ToolSummary};
