//! Signature adapter for native callables
//!
//! Builtins do not declare a parameter list, but most carry a text signature
//! such as `($module, x, y, /)`. This module parses that text into a
//! [`ToolSignature`] the schema generator can consume.

use serde_json::Value;
use thiserror::Error;

use crate::types::{Callable, CallableKind, Parameter, ToolSignature};

/// Errors raised while adapting a callable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdaptError {
    #[error("Signature unknown for '{name}': {reason}")]
    SignatureUnknown { name: String, reason: String },
}

pub type AdaptResult<T> = Result<T, AdaptError>;

/// Build the introspectable descriptor for a callable
///
/// Declared functions pass through unchanged. Builtins have their text
/// signature parsed; parameters come out untyped.
///
/// # Example
///
/// ```
/// use lib2mcp_core::resolver::resolve;
/// use lib2mcp_core::tools::adapt;
///
/// let pow = resolve("math", "pow").unwrap();
/// let signature = adapt(&pow).unwrap();
/// assert_eq!(signature.param_names(), vec!["x", "y"]);
/// ```
pub fn adapt(callable: &Callable) -> AdaptResult<ToolSignature> {
    let name = callable.name().unwrap_or("<anonymous>");
    let unknown = |reason: String| AdaptError::SignatureUnknown {
        name: name.to_string(),
        reason,
    };

    if callable.name().is_none() {
        return Err(unknown("callable has no name".to_string()));
    }

    let params = match callable.kind() {
        CallableKind::Function(params) => params.clone(),
        CallableKind::Builtin { text_signature: Some(text) } => {
            parse_text_signature(text).map_err(unknown)?
        }
        CallableKind::Builtin { text_signature: None } => {
            return Err(unknown("no text signature available".to_string()));
        }
    };

    Ok(ToolSignature::new(name, params).with_doc(callable.doc().map(str::to_string)))
}

/// Parse a text signature like `($module, x, /, base=10, *args, **kwargs)`
///
/// `$`-prefixed bound parameters and the `/` and bare `*` markers are dropped.
pub fn parse_text_signature(text: &str) -> Result<Vec<Parameter>, String> {
    let text = text.trim();
    let open = text.find('(').ok_or("missing '('")?;
    let close = text.rfind(')').ok_or("missing ')'")?;
    if close < open {
        return Err("unbalanced parentheses".to_string());
    }

    let mut params: Vec<Parameter> = Vec::new();
    for token in split_top_level(&text[open + 1..close])? {
        let token = token.trim();
        if token.is_empty() || token == "/" || token == "*" || token.starts_with('$') {
            continue;
        }

        let param = if let Some(name) = token.strip_prefix("**") {
            Parameter::keywords(identifier(name)?)
        } else if let Some(name) = token.strip_prefix('*') {
            Parameter::variadic(identifier(name)?)
        } else if let Some((name, default)) = token.split_once('=') {
            Parameter::any(identifier(name)?).with_default(parse_default(default.trim()))
        } else {
            Parameter::any(identifier(token)?)
        };

        if params.iter().any(|p| p.name == param.name) {
            return Err(format!("duplicate parameter '{}'", param.name));
        }
        params.push(param);
    }

    Ok(params)
}

/// Split on commas that are not nested inside brackets or quotes
fn split_top_level(inner: &str) -> Result<Vec<&str>, String> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => {
                    depth = depth.checked_sub(1).ok_or("unbalanced brackets")?;
                }
                ',' if depth == 0 => {
                    parts.push(&inner[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }

    if quote.is_some() || depth != 0 {
        return Err("unterminated default value".to_string());
    }
    parts.push(&inner[start..]);
    Ok(parts)
}

/// Validate a parameter name, dropping any `: annotation`
fn identifier(raw: &str) -> Result<String, String> {
    let name = raw.split(':').next().unwrap_or(raw).trim();
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_');
    if valid {
        Ok(name.to_string())
    } else {
        Err(format!("invalid parameter name '{}'", raw.trim()))
    }
}

/// Interpret a default: JSON literals, the usual keyword constants and quoted
/// strings; anything else is kept as its source text
fn parse_default(raw: &str) -> Value {
    match raw {
        "None" => return Value::Null,
        "True" => return Value::Bool(true),
        "False" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return value;
    }

    let unquoted = raw
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(raw);
    Value::String(unquoted.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CallResult, ParamKind, ParamType};
    use serde_json::json;

    fn noop(_: &[Value]) -> CallResult<Value> {
        Ok(Value::Null)
    }

    #[test]
    fn test_adapt_builtin_preserves_identity() {
        let f = Callable::builtin("atan2", Some("($module, y, x, /)"), noop)
            .with_doc("Return the arc tangent of y/x.");

        let signature = adapt(&f).unwrap();
        assert_eq!(signature.name, "atan2");
        assert_eq!(signature.param_names(), vec!["y", "x"]);
        assert_eq!(signature.doc.as_deref(), Some("Return the arc tangent of y/x."));
        assert!(signature.params.iter().all(|p| p.ty == ParamType::Any));
    }

    #[test]
    fn test_adapt_declared_function_passes_through() {
        let params = vec![Parameter::new("x", ParamType::Integer)];
        let f = Callable::function("ISEOF", params.clone(), noop);
        assert_eq!(adapt(&f).unwrap().params, params);
    }

    #[test]
    fn test_adapt_without_text_signature() {
        let f = Callable::builtin("log", None, noop);
        let err = adapt(&f).unwrap_err();
        assert_eq!(
            err,
            AdaptError::SignatureUnknown {
                name: "log".to_string(),
                reason: "no text signature available".to_string(),
            }
        );
    }

    #[test]
    fn test_adapt_unparseable_text_signature() {
        let f = Callable::builtin("broken", Some("x, y"), noop);
        assert!(matches!(adapt(&f), Err(AdaptError::SignatureUnknown { .. })));
    }

    #[test]
    fn test_parse_defaults_and_markers() {
        let params = parse_text_signature("($self, iterable, /, start=0, *, sep=', ', flag=True, end=None)").unwrap();
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["iterable", "start", "sep", "flag", "end"]);
        assert_eq!(params[1].default, Some(json!(0)));
        assert_eq!(params[2].default, Some(json!(", ")));
        assert_eq!(params[3].default, Some(json!(true)));
        assert_eq!(params[4].default, Some(Value::Null));
    }

    #[test]
    fn test_parse_variadics() {
        let params = parse_text_signature("(*coordinates, **options)").unwrap();
        assert_eq!(params[0].kind, ParamKind::Variadic);
        assert_eq!(params[1].kind, ParamKind::Keywords);
    }

    #[test]
    fn test_parse_empty_signature() {
        assert!(parse_text_signature("()").unwrap().is_empty());
        assert!(parse_text_signature("($module, /)").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_text_signature("(x, x)").is_err());
        assert!(parse_text_signature("(1x)").is_err());
        assert!(parse_text_signature("(x='open)").is_err());
    }
}
