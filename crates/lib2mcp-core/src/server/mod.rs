//! Server assembly
//!
//! Resolves every function a [`LibrarySpec`](crate::config::LibrarySpec)
//! selects, registers it, and returns a [`ToolServer`] for the MCP layer.

mod builder;

pub use builder::{
    build, BuildError, BuildReport, BuildResult, FailedFunction, ServerBuilder, ToolServer,
    DEFAULT_SERVER_NAME,
};
