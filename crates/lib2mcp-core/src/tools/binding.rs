//! Binding named JSON arguments onto positional parameters

use serde_json::{Map, Value};

use crate::types::{CallError, CallResult, ParamKind, ToolSignature};

/// Map a `tools/call` arguments object onto the signature's positional slots
///
/// Missing arguments fall back to defaults. A variadic parameter takes an
/// array and spreads it. Names the signature does not know are collected by a
/// keywords parameter if there is one, otherwise they are rejected.
pub fn bind_arguments(signature: &ToolSignature, arguments: &Map<String, Value>) -> CallResult<Vec<Value>> {
    let mut positional = Vec::with_capacity(signature.params.len());

    for param in &signature.params {
        match param.kind {
            ParamKind::Positional => match arguments.get(&param.name) {
                Some(value) => {
                    if !param.ty.accepts(value) {
                        return Err(CallError::InvalidArgument {
                            name: param.name.clone(),
                            expected: param.ty.to_string(),
                        });
                    }
                    positional.push(value.clone());
                }
                None => match &param.default {
                    Some(default) => positional.push(default.clone()),
                    None => return Err(CallError::MissingArgument(param.name.clone())),
                },
            },
            ParamKind::Variadic => match arguments.get(&param.name) {
                Some(Value::Array(items)) => positional.extend(items.iter().cloned()),
                Some(Value::Null) | None => {}
                Some(_) => {
                    return Err(CallError::InvalidArgument {
                        name: param.name.clone(),
                        expected: "array".to_string(),
                    })
                }
            },
            ParamKind::Keywords => {
                let mut extra = match arguments.get(&param.name) {
                    Some(Value::Object(map)) => map.clone(),
                    Some(Value::Null) | None => Map::new(),
                    Some(_) => {
                        return Err(CallError::InvalidArgument {
                            name: param.name.clone(),
                            expected: "object".to_string(),
                        })
                    }
                };
                for (key, value) in arguments {
                    if !signature.params.iter().any(|p| &p.name == key) {
                        extra.insert(key.clone(), value.clone());
                    }
                }
                positional.push(Value::Object(extra));
            }
        }
    }

    let collects_extra = signature.params.iter().any(|p| p.kind == ParamKind::Keywords);
    if !collects_extra {
        if let Some(key) = arguments
            .keys()
            .find(|key| !signature.params.iter().any(|p| &p.name == *key))
        {
            return Err(CallError::UnexpectedArgument(key.clone()));
        }
    }

    Ok(positional)
}
