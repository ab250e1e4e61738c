// Security module for path confinement
//
// Include directives and asset lookups name files relative to a root
// directory. These helpers make sure such lookups never leave that root.

pub mod path_validator;

pub use path_validator::{resolve_within, PathSecurityError};
