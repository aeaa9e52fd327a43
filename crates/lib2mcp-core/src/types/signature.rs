//! Parameter and signature descriptors
//!
//! A [`ToolSignature`] is what the schema generator consumes: a name, the
//! ordered parameter list and the documentation. It replaces generating a
//! passthrough function at runtime.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type of a parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// No declared type, accepts any JSON value
    Any,
    Number,
    Integer,
    String,
    Boolean,
    Array,
    Object,
    /// A native type with no JSON representation (file handles, callbacks, ...)
    Opaque(String),
}

impl ParamType {
    /// JSON Schema `type` keyword for this parameter, if it has one
    ///
    /// `Any` maps to no keyword at all; `Opaque` has no mapping.
    pub fn json_type(&self) -> Option<&'static str> {
        match self {
            ParamType::Any | ParamType::Opaque(_) => None,
            ParamType::Number => Some("number"),
            ParamType::Integer => Some("integer"),
            ParamType::String => Some("string"),
            ParamType::Boolean => Some("boolean"),
            ParamType::Array => Some("array"),
            ParamType::Object => Some("object"),
        }
    }

    /// Whether a JSON value is acceptable for this type
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ParamType::Any => true,
            ParamType::Number => value.is_number(),
            ParamType::Integer => value.is_i64() || value.is_u64(),
            ParamType::String => value.is_string(),
            ParamType::Boolean => value.is_boolean(),
            ParamType::Array => value.is_array(),
            ParamType::Object => value.is_object(),
            ParamType::Opaque(_) => false,
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamType::Any => write!(f, "any"),
            ParamType::Opaque(name) => write!(f, "{}", name),
            other => write!(f, "{}", other.json_type().unwrap_or("any")),
        }
    }
}

/// How a parameter binds to positional arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Exactly one positional slot
    #[default]
    Positional,
    /// Takes a JSON array and spreads it over the remaining slots
    Variadic,
    /// Collects extra keyword arguments as a JSON object
    Keywords,
}

/// A single declared parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ParamType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default)]
    pub kind: ParamKind,
}

impl Parameter {
    /// Create a required positional parameter
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            kind: ParamKind::Positional,
        }
    }

    /// Create an untyped positional parameter
    pub fn any(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Any)
    }

    /// Create a variadic parameter (`*name`)
    pub fn variadic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ParamType::Array,
            default: None,
            kind: ParamKind::Variadic,
        }
    }

    /// Create a keyword-collecting parameter (`**name`)
    pub fn keywords(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ParamType::Object,
            default: None,
            kind: ParamKind::Keywords,
        }
    }

    /// Set the default value, making the parameter optional
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Whether a caller must supply this parameter
    pub fn is_required(&self) -> bool {
        self.kind == ParamKind::Positional && self.default.is_none()
    }
}

/// Introspectable description of a callable, consumed by the schema generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSignature {
    pub name: String,
    pub params: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl ToolSignature {
    pub fn new(name: impl Into<String>, params: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            params,
            doc: None,
        }
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    /// Parameter names in declaration order
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }
}
