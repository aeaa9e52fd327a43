//! Function resolution against the library catalog

use std::sync::Arc;

use thiserror::Error;

use crate::library::{load_library, Library, Member};
use crate::types::Callable;

/// Errors raised while resolving a library or one of its functions
///
/// All of these mean the configuration names something that does not exist,
/// so they abort the build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    #[error("Function '{function}' not found in library '{library}'")]
    FunctionNotFound { library: String, function: String },

    #[error("'{library}.{attribute}' is a {kind}, not a function")]
    NotCallable {
        library: String,
        attribute: String,
        kind: String,
    },
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Locate a callable by library identifier and attribute name
///
/// # Example
///
/// ```
/// use lib2mcp_core::resolver::resolve;
///
/// let sqrt = resolve("math", "sqrt").unwrap();
/// assert_eq!(sqrt.name(), Some("sqrt"));
/// ```
pub fn resolve(library_id: &str, function_name: &str) -> ResolveResult<Callable> {
    resolve_in(library_id, &*import(library_id)?, function_name)
}

/// Run the catalog factory for `library_id`
pub fn import(library_id: &str) -> ResolveResult<Arc<Library>> {
    load_library(library_id).ok_or_else(|| ResolveError::LibraryNotFound(library_id.to_string()))
}

/// Locate a callable in a library already imported under `library_id`
pub fn resolve_in(library_id: &str, library: &Library, function_name: &str) -> ResolveResult<Callable> {
    match library.get(function_name) {
        Some(Member::Routine(callable)) => Ok(callable.clone()),
        Some(other) => Err(ResolveError::NotCallable {
            library: library_id.to_string(),
            attribute: function_name.to_string(),
            kind: other.kind_name().to_string(),
        }),
        None => Err(ResolveError::FunctionNotFound {
            library: library_id.to_string(),
            function: function_name.to_string(),
        }),
    }
}

/// Names of every routine in a library, sorted lexicographically
///
/// Constants, classes and nested modules are left out. A library without
/// routines yields an empty list.
pub fn enumerate_functions(library_id: &str) -> ResolveResult<Vec<String>> {
    Ok(import(library_id)?.routine_names())
}
