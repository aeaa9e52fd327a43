//! Tool management module
//!
//! This module turns resolved callables into MCP tools:
//! - `adapter`: reconstructs a signature descriptor for native callables
//! - `schema`: derives the JSON input schema from a descriptor
//! - `registry`: ordered tool collection, listing and invocation
//! - `registrar`: registers one callable, absorbing per-function failures
//!
//! ```text
//! Callable ──► adapt ──► ToolSignature ──► input_schema ──► ToolRegistry
//!                │                              │
//!                └── SignatureUnknown           └── SchemaError
//!                          (Registration::Failed, build continues)
//! ```

mod adapter;
mod binding;
mod registrar;
mod registry;
mod schema;

pub use adapter::{adapt, parse_text_signature, AdaptError, AdaptResult};
pub use binding::bind_arguments;
pub use registrar::{register, Registration, RegistrationFailure};
pub use registry::{RegistryError, RegistryResult, ToolInfo, ToolRegistry};
pub use schema::{input_schema, SchemaError, SchemaResult};
