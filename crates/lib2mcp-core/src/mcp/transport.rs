//! Transports for serving an [`McpToolService`]
//!
//! - `stdio`: newline-delimited JSON-RPC over stdin/stdout
//! - `streamable-http`: MCP Streamable HTTP at `http://host:port/mcp`

use std::future::Future;
use std::str::FromStr;

use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use rmcp::ServiceExt;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;

use super::service::McpToolService;
use crate::config::{DEFAULT_HOST, DEFAULT_PORT};
use crate::logging::{Logger, SharedLogger};

/// Path the streamable HTTP endpoint is mounted at
pub const HTTP_ENDPOINT: &str = "/mcp";

/// Errors raised while serving
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Unsupported transport '{0}': expected 'stdio' or 'streamable-http'")]
    UnsupportedTransport(String),

    #[error("Failed to initialize MCP session: {0}")]
    Initialize(String),

    #[error("Server stopped unexpectedly: {0}")]
    Runtime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServeResult<T> = Result<T, ServeError>;

/// Transport protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    #[default]
    Stdio,
    StreamableHttp,
}

impl Transport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transport::Stdio => "stdio",
            Transport::StreamableHttp => "streamable-http",
        }
    }
}

impl FromStr for Transport {
    type Err = ServeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdio" => Ok(Transport::Stdio),
            "streamable-http" | "streamable_http" | "http" => Ok(Transport::StreamableHttp),
            other => Err(ServeError::UnsupportedTransport(other.to_string())),
        }
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how to serve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
    pub transport: Transport,
    /// Only used by the HTTP transport
    pub host: String,
    /// Only used by the HTTP transport
    pub port: u16,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            transport: Transport::Stdio,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Serve until the client disconnects (stdio) or Ctrl-C (HTTP)
pub async fn serve(service: McpToolService, options: &ServeOptions, logger: SharedLogger) -> ServeResult<()> {
    match options.transport {
        Transport::Stdio => {
            crate::log_info!(logger, "[Transport] Serving '{}' over stdio", service.name());
            let (stdin, stdout) = rmcp::transport::stdio();
            serve_io(service, stdin, stdout, logger).await
        }
        Transport::StreamableHttp => {
            let listener = TcpListener::bind((options.host.as_str(), options.port)).await?;
            let shutdown = shutdown_signal(logger.clone());
            serve_http(service, listener, shutdown, logger).await
        }
    }
}

/// Run one MCP session over a byte stream pair until the peer closes it
pub async fn serve_io<R, W>(service: McpToolService, reader: R, writer: W, logger: SharedLogger) -> ServeResult<()>
where
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Send + Unpin + 'static,
{
    let running = service
        .serve((reader, writer))
        .await
        .map_err(|e| ServeError::Initialize(e.to_string()))?;
    let reason = running
        .waiting()
        .await
        .map_err(|e| ServeError::Runtime(e.to_string()))?;
    crate::log_info!(logger, "[Transport] Session ended: {:?}", reason);
    Ok(())
}

/// Serve Streamable HTTP on `listener` until `shutdown` resolves
pub async fn serve_http<F>(
    service: McpToolService,
    listener: TcpListener,
    shutdown: F,
    logger: SharedLogger,
) -> ServeResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    crate::log_info!(
        logger,
        "[Transport] Serving '{}' at http://{}{}",
        service.name(),
        listener.local_addr()?,
        HTTP_ENDPOINT
    );

    let http = StreamableHttpService::new(
        move || Ok(service.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = axum::Router::new().nest_service(HTTP_ENDPOINT, http);

    axum::serve(listener, router).with_graceful_shutdown(shutdown).await?;
    logger.info("[Transport] HTTP server stopped");
    Ok(())
}

/// Resolves on Ctrl-C
///
/// If the handler cannot be installed the server keeps running instead of
/// shutting down at once.
async fn shutdown_signal(logger: SharedLogger) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        crate::log_error!(logger, "[Transport] Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LibrarySpec, Selector};
    use crate::logging::NoOpLogger;
    use crate::server::ServerBuilder;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};

    fn math_service() -> McpToolService {
        let spec = LibrarySpec::new().with(
            "math",
            Selector::Many(vec!["sqrt".to_string(), "exp".to_string()]),
        );
        let server = ServerBuilder::default().build(&spec).unwrap();
        McpToolService::new(&server, Arc::new(NoOpLogger::new()))
    }

    async fn send<W: AsyncWrite + Unpin>(writer: &mut W, frame: &Value) {
        writer.write_all(format!("{}\n", frame).as_bytes()).await.unwrap();
        writer.flush().await.unwrap();
    }

    /// Next response carrying `id`, skipping notifications
    async fn response<R: AsyncBufRead + Unpin>(lines: &mut Lines<R>, id: i64) -> Value {
        loop {
            let line = lines.next_line().await.unwrap().expect("session closed early");
            let msg: Value = serde_json::from_str(&line).unwrap();
            if msg["id"] == json!(id) {
                return msg;
            }
        }
    }

    #[tokio::test]
    async fn test_session_over_byte_stream() {
        let (client, server) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server);
        let session = tokio::spawn(serve_io(
            math_service(),
            server_read,
            server_write,
            Arc::new(NoOpLogger::new()),
        ));

        let (client_read, mut client_write) = tokio::io::split(client);
        let mut lines = BufReader::new(client_read).lines();
        send(
            &mut client_write,
            &json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2025-03-26",
                    "capabilities": {},
                    "clientInfo": {"name": "lib2mcp-test", "version": "0.0.0"}
                }
            }),
        )
        .await;
        let init = response(&mut lines, 1).await;
        assert!(init["result"]["capabilities"]["tools"].is_object());

        send(&mut client_write, &json!({"jsonrpc": "2.0", "method": "notifications/initialized"})).await;

        send(&mut client_write, &json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list", "params": {}})).await;
        let listed = response(&mut lines, 2).await;
        let names: Vec<_> = listed["result"]["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["sqrt", "exp"]);

        send(
            &mut client_write,
            &json!({
                "jsonrpc": "2.0",
                "id": 3,
                "method": "tools/call",
                "params": {"name": "sqrt", "arguments": {"x": 4.0}}
            }),
        )
        .await;
        let called = response(&mut lines, 3).await;
        assert_eq!(called["result"]["content"][0]["text"], json!("2.0"));
        assert_eq!(called["result"]["isError"], json!(false));

        drop(client_write);
        drop(lines);
        session.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_http_runs_until_shutdown() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(serve_http(
            math_service(),
            listener,
            async {
                let _ = stopped.await;
            },
            Arc::new(NoOpLogger::new()),
        ));

        tokio::net::TcpStream::connect(addr).await.unwrap();
        tokio::task::yield_now().await;
        assert!(!server.is_finished());

        stop.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[test]
    fn test_transport_from_str() {
        assert_eq!("stdio".parse::<Transport>().unwrap(), Transport::Stdio);
        assert_eq!("Streamable-HTTP".parse::<Transport>().unwrap(), Transport::StreamableHttp);
        assert_eq!("http".parse::<Transport>().unwrap(), Transport::StreamableHttp);
    }

    #[test]
    fn test_unsupported_transport() {
        let err = "sse".parse::<Transport>().unwrap_err();
        assert!(matches!(err, ServeError::UnsupportedTransport(ref t) if t == "sse"));
        assert!(err.to_string().contains("streamable-http"));
    }

    #[test]
    fn test_default_options() {
        let options = ServeOptions::default();
        assert_eq!(options.transport, Transport::Stdio);
        assert_eq!(options.host, "127.0.0.1");
        assert_eq!(options.port, 8000);
        assert_eq!(options.transport.to_string(), "stdio");
    }
}
