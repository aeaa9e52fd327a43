//! MCP server handler backed by a [`ToolRegistry`]
//!
//! Answers `tools/list` and `tools/call` using the official rmcp SDK.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    ErrorData, RoleServer, ServerHandler,
};
use serde_json::{Map, Value};

use crate::logging::{Logger, SharedLogger};
use crate::server::ToolServer;
use crate::tools::{ToolInfo, ToolRegistry};
use crate::types::CallError;

/// rmcp service exposing the tools of a built [`ToolServer`]
#[derive(Clone)]
pub struct McpToolService {
    name: String,
    registry: Arc<ToolRegistry>,
    logger: SharedLogger,
}

impl std::fmt::Debug for McpToolService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpToolService")
            .field("name", &self.name)
            .field("registry", &self.registry)
            .finish()
    }
}

impl From<&ToolInfo> for Tool {
    fn from(info: &ToolInfo) -> Self {
        let schema = match &info.input_schema {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        Tool::new(info.name.clone(), info.description.clone(), schema)
    }
}

impl McpToolService {
    pub fn new(server: &ToolServer, logger: SharedLogger) -> Self {
        Self {
            name: server.name().to_string(),
            registry: Arc::clone(server.registry()),
            logger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registry entries as MCP tool definitions, in registration order
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.list_tools().iter().map(Tool::from).collect()
    }

    /// Run a tool call
    ///
    /// Unknown tools are a protocol error. Failures inside the tool are
    /// reported as an error result so the client can show them.
    pub fn call(&self, name: &str, arguments: Option<Map<String, Value>>) -> Result<CallToolResult, ErrorData> {
        let arguments = arguments.unwrap_or_default();
        self.logger.debug(&format!("[McpToolService] Calling tool: {}", name));

        match self.registry.call_tool(name, &arguments) {
            Ok(value) => Ok(CallToolResult::success(vec![Content::text(result_text(value))])),
            Err(CallError::UnknownTool(_)) => Err(ErrorData::invalid_params(
                format!("Tool not found: {}", name),
                None,
            )),
            Err(err) => {
                self.logger.warn(&format!("[McpToolService] Tool '{}' failed: {}", name, err));
                Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
            }
        }
    }
}

/// Strings are returned as-is, anything else as JSON
fn result_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

impl ServerHandler for McpToolService {
    fn get_info(&self) -> ServerInfo {
        let tools = self.registry.tool_names().join(", ");
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(format!("Library functions exposed as tools: {}", tools)),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.call(&request.name, request.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LibrarySpec, Selector};
    use crate::logging::NoOpLogger;
    use crate::server::ServerBuilder;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn service(spec: LibrarySpec) -> McpToolService {
        let server = ServerBuilder::default()
            .with_name(Some("test server"))
            .build(&spec)
            .unwrap();
        McpToolService::new(&server, Arc::new(NoOpLogger::new()))
    }

    fn text(result: &CallToolResult) -> String {
        result
            .content
            .iter()
            .filter_map(|c| match &c.raw {
                RawContent::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_tools_follow_registry_order() {
        let svc = service(LibrarySpec::new().with(
            "math",
            Selector::Many(vec!["sqrt".to_string(), "exp".to_string()]),
        ));

        let tools = svc.tools();
        let names: Vec<_> = tools.iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, vec!["sqrt", "exp"]);
        assert_eq!(tools[0].input_schema.get("type"), Some(&json!("object")));
    }

    #[test]
    fn test_server_info() {
        let svc = service(LibrarySpec::new().with("token", Selector::All));
        let info = svc.get_info();

        assert_eq!(info.server_info.name, "test server");
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("ISEOF"));
    }

    #[test]
    fn test_call_success() {
        let svc = service(LibrarySpec::new().with("math", Selector::One("sqrt".into())));
        let args = json!({ "x": 4.0 }).as_object().cloned();

        let result = svc.call("sqrt", args).unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text(&result), "2.0");
    }

    #[test]
    fn test_string_results_are_not_quoted() {
        let svc = service(LibrarySpec::new().with(
            "text",
            Selector::Many(vec!["upper".to_string(), "split".to_string()]),
        ));

        let result = svc.call("upper", json!({ "text": "abc" }).as_object().cloned()).unwrap();
        assert_eq!(text(&result), "ABC");

        let result = svc.call("split", json!({ "text": "a b" }).as_object().cloned()).unwrap();
        assert_eq!(text(&result), r#"["a","b"]"#);
    }

    #[test]
    fn test_call_failure_is_error_result() {
        let svc = service(LibrarySpec::new().with("math", Selector::One("sqrt".into())));

        let result = svc.call("sqrt", None).unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text(&result), "Missing required argument: x");

        let result = svc.call("sqrt", json!({ "x": -1.0 }).as_object().cloned()).unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_call_unknown_tool() {
        let svc = service(LibrarySpec::new().with("math", Selector::One("sqrt".into())));
        assert!(svc.call("cbrt", None).is_err());
    }
}
