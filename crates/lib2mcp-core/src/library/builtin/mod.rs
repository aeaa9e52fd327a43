//! Built-in libraries shipped with the catalog

mod math;
mod text;
mod token;

use serde_json::Value;

use super::registry::LibraryFactory;
use crate::types::{CallError, CallResult};

/// (identifier, description, factory) for every built-in library
pub(super) fn definitions() -> Vec<(&'static str, &'static str, LibraryFactory)> {
    vec![
        ("math", "Mathematical functions over floating point numbers", Box::new(math::library) as LibraryFactory),
        ("token", "Token type constants and classification helpers", Box::new(token::library) as LibraryFactory),
        ("text", "String manipulation helpers", Box::new(text::library) as LibraryFactory),
    ]
}

fn arg<'a>(args: &'a [Value], index: usize, name: &str) -> CallResult<&'a Value> {
    args.get(index)
        .ok_or_else(|| CallError::MissingArgument(name.to_string()))
}

fn invalid(name: &str, expected: &str) -> CallError {
    CallError::InvalidArgument {
        name: name.to_string(),
        expected: expected.to_string(),
    }
}

fn number_arg(args: &[Value], index: usize, name: &str) -> CallResult<f64> {
    arg(args, index, name)?
        .as_f64()
        .ok_or_else(|| invalid(name, "number"))
}

fn integer_arg(args: &[Value], index: usize, name: &str) -> CallResult<i64> {
    arg(args, index, name)?
        .as_i64()
        .ok_or_else(|| invalid(name, "integer"))
}

fn string_arg<'a>(args: &'a [Value], index: usize, name: &str) -> CallResult<&'a str> {
    arg(args, index, name)?
        .as_str()
        .ok_or_else(|| invalid(name, "string"))
}

/// Optional string: absent and `null` both mean "not given"
fn optional_string_arg<'a>(args: &'a [Value], index: usize, name: &str) -> CallResult<Option<&'a str>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(invalid(name, "string or null")),
    }
}

fn check_arity(args: &[Value], min: usize, max: usize) -> CallResult<()> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            min.to_string()
        } else {
            format!("{} to {}", min, max)
        };
        return Err(CallError::Arity { expected, got: args.len() });
    }
    Ok(())
}
