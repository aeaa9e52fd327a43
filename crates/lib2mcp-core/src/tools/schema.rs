//! JSON Schema generation for tool inputs

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::types::{ParamKind, ParamType, ToolSignature};

/// A parameter whose type has no JSON Schema representation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("parameter '{param}' has type '{ty}' which cannot be represented in JSON Schema")]
pub struct SchemaError {
    pub param: String,
    pub ty: String,
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Derive the `inputSchema` object for a signature
///
/// Untyped parameters get an empty schema (anything goes). Parameters with a
/// default are optional; variadic and keyword parameters are always optional.
pub fn input_schema(signature: &ToolSignature) -> SchemaResult<Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in &signature.params {
        if let ParamType::Opaque(ty) = &param.ty {
            return Err(SchemaError {
                param: param.name.clone(),
                ty: ty.clone(),
            });
        }

        let mut property = Map::new();
        match param.kind {
            ParamKind::Positional => {
                if let Some(ty) = param.ty.json_type() {
                    property.insert("type".into(), json!(ty));
                }
            }
            ParamKind::Variadic => {
                property.insert("type".into(), json!("array"));
            }
            ParamKind::Keywords => {
                property.insert("type".into(), json!("object"));
            }
        }
        if let Some(default) = &param.default {
            property.insert("default".into(), default.clone());
        }

        if param.is_required() {
            required.push(json!(param.name));
        }
        properties.insert(param.name.clone(), Value::Object(property));
    }

    Ok(json!({
        "type": "object",
        "properties": properties,
        "required": required,
    }))
}
