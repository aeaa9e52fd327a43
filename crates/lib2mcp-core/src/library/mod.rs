//! Library catalog
//!
//! Libraries are registered under an identifier and built on demand.
//! Built-in libraries:
//! - `math`: native numeric routines (builtins with text signatures)
//! - `token`: token-number helpers and constants
//! - `text`: typed string helpers

mod builtin;
mod definition;
mod registry;

pub use definition::{Library, Member};
pub use registry::{
    has_library, list_libraries, load_library, register_library, unregister_library,
    LibraryDefinition, LibraryFactory,
};
