//! lib2mcp Core
//!
//! Exposes functions from a catalog of libraries as MCP tools.
//!
//! A [`LibrarySpec`] maps library identifiers to a selection of their
//! functions. Building it resolves each function, adapts builtins that only
//! carry a text signature, derives a JSON input schema and registers the
//! result with a [`ToolRegistry`]. Functions that cannot be exposed are
//! skipped with a warning; the build only fails when the specification is
//! invalid, a name does not resolve, or nothing was registered.
//!
//! ```rust
//! use lib2mcp_core::{build, LibrarySpec, Selector};
//! use serde_json::json;
//!
//! let spec = LibrarySpec::new().with("math", Selector::One("sqrt".into()));
//! let server = build(&spec, None).unwrap();
//!
//! let args = json!({"x": 4.0});
//! let result = server.registry().call_tool("sqrt", args.as_object().unwrap()).unwrap();
//! assert_eq!(result, json!(2.0));
//! ```
//!
//! ## Serving
//!
//! ```rust,ignore
//! use lib2mcp_core::mcp::{serve, McpToolService, ServeOptions};
//!
//! let service = McpToolService::new(&server, logger.clone());
//! serve(service, &ServeOptions::default(), logger).await?;
//! ```

pub mod types;
pub mod logging;
pub mod library;
pub mod resolver;
pub mod tools;
pub mod config;
pub mod server;
pub mod mcp;

// Re-export commonly used types
pub use types::{Callable, CallableKind, CallError, CallResult, Parameter, ParamType, ToolSignature};

pub use logging::{ConsoleLogger, Logger, MemoryLogger, NoOpLogger, SharedLogger};

pub use library::{list_libraries, register_library, Library, Member};

pub use resolver::{enumerate_functions, resolve, ResolveError};

pub use tools::{adapt, register, AdaptError, Registration, RegistrationFailure, ToolInfo, ToolRegistry};

pub use config::{parse_library_functions, FileConfigProvider, LibrarySpec, Selector, SpecError};

pub use server::{build, BuildError, BuildReport, ServerBuilder, ToolServer, DEFAULT_SERVER_NAME};

pub use mcp::{serve, McpToolService, ServeOptions, Transport};
