//! Tool registry holding the tools a server exposes
//!
//! The ToolRegistry is the collection the build pipeline appends to:
//! - Deriving an input schema from a signature when a tool is added
//! - Listing tools in registration order
//! - Invoking tools by name with a JSON arguments object

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::binding::bind_arguments;
use super::schema::{input_schema, SchemaError};
use crate::types::{CallError, CallResult, NativeFn, ToolSignature};

/// Longest tool name MCP clients are required to accept
const MAX_TOOL_NAME_LEN: usize = 128;

/// Information about a registered tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for tool parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Errors raised while adding a tool
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Schema generation failed: {0}")]
    Schema(#[from] SchemaError),

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Invalid tool name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

pub type RegistryResult<T> = Result<T, RegistryError>;

struct ToolEntry {
    info: ToolInfo,
    signature: ToolSignature,
    handler: NativeFn,
}

/// Ordered collection of tools
#[derive(Default)]
pub struct ToolRegistry {
    /// Entries in registration order
    entries: RwLock<Vec<ToolEntry>>,
    /// Name to position in `entries`
    index: RwLock<HashMap<String, usize>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.entries.read().iter().map(|e| e.info.name.clone()).collect();
        f.debug_struct("ToolRegistry")
            .field("tools", &names)
            .finish()
    }
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the schema for `signature` and add it as a tool
    ///
    /// Nothing is added when this returns an error.
    pub fn add_tool(&self, signature: ToolSignature, handler: NativeFn) -> RegistryResult<ToolInfo> {
        validate_name(&signature.name)?;
        let schema = input_schema(&signature)?;

        let mut entries = self.entries.write();
        let mut index = self.index.write();
        if index.contains_key(&signature.name) {
            return Err(RegistryError::DuplicateTool(signature.name.clone()));
        }

        let info = ToolInfo {
            name: signature.name.clone(),
            description: signature.doc.clone().unwrap_or_default(),
            input_schema: schema,
        };

        index.insert(info.name.clone(), entries.len());
        entries.push(ToolEntry {
            info: info.clone(),
            signature,
            handler,
        });

        Ok(info)
    }

    /// All tools in registration order
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.entries.read().iter().map(|e| e.info.clone()).collect()
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<ToolInfo> {
        let position = *self.index.read().get(name)?;
        self.entries.read().get(position).map(|e| e.info.clone())
    }

    /// The signature a tool was registered with
    pub fn signature(&self, name: &str) -> Option<ToolSignature> {
        let position = *self.index.read().get(name)?;
        self.entries.read().get(position).map(|e| e.signature.clone())
    }

    /// Call a tool with a JSON arguments object
    pub fn call_tool(&self, name: &str, arguments: &Map<String, Value>) -> CallResult<Value> {
        let (signature, handler) = {
            let position = *self
                .index
                .read()
                .get(name)
                .ok_or_else(|| CallError::UnknownTool(name.to_string()))?;
            let entries = self.entries.read();
            let entry = entries
                .get(position)
                .ok_or_else(|| CallError::UnknownTool(name.to_string()))?;
            (entry.signature.clone(), entry.handler.clone())
        };

        let args = bind_arguments(&signature, arguments)?;
        handler(&args)
    }

    /// Names of all tools in registration order
    pub fn tool_names(&self) -> Vec<String> {
        self.entries.read().iter().map(|e| e.info.name.clone()).collect()
    }

    /// Get count of registered tools
    pub fn tool_count(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tool_count() == 0
    }
}

/// MCP tool names: 1 to 128 characters from `[A-Za-z0-9_.-]`
fn validate_name(name: &str) -> RegistryResult<()> {
    let invalid = |reason: &str| RegistryError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.len() > MAX_TOOL_NAME_LEN {
        return Err(invalid("name is longer than 128 characters"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(invalid("only ASCII letters, digits, '_', '-' and '.' are allowed"));
    }
    Ok(())
}
