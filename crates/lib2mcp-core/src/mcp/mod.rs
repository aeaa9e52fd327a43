//! MCP (Model Context Protocol) server module
//!
//! Uses the official rmcp SDK to serve a built
//! [`ToolServer`](crate::server::ToolServer) over stdio or Streamable HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use lib2mcp_core::mcp::{serve, McpToolService, ServeOptions};
//!
//! let server = ServerBuilder::new(logger.clone()).build(&spec)?;
//! let service = McpToolService::new(&server, logger.clone());
//! serve(service, &ServeOptions::default(), logger).await?;
//! ```

mod service;
mod transport;

pub use service::McpToolService;
pub use transport::{serve, serve_http, serve_io, ServeError, ServeOptions, ServeResult, Transport, HTTP_ENDPOINT};
