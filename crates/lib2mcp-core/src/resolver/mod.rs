//! Resolution of library functions by name
//!
//! Turns the two strings from a library specification (library identifier,
//! function name) into a [`Callable`](crate::types::Callable), or lists the
//! routines a library exposes.

mod function_resolver;

pub use function_resolver::{enumerate_functions, import, resolve, resolve_in, ResolveError, ResolveResult};
