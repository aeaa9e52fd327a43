//! `text`: typed string helpers

use serde_json::{json, Value};

use super::{arg, check_arity, invalid, optional_string_arg, string_arg};
use crate::library::{Library, Member};
use crate::types::{CallResult, Callable, ParamType, Parameter};

fn text_param() -> Parameter {
    Parameter::new("text", ParamType::String)
}

fn upper() -> Callable {
    Callable::function("upper", vec![text_param()], |args: &[Value]| {
        check_arity(args, 1, 1)?;
        Ok(json!(string_arg(args, 0, "text")?.to_uppercase()))
    })
    .with_doc("Return a copy of the string converted to uppercase.")
}

fn lower() -> Callable {
    Callable::function("lower", vec![text_param()], |args: &[Value]| {
        check_arity(args, 1, 1)?;
        Ok(json!(string_arg(args, 0, "text")?.to_lowercase()))
    })
    .with_doc("Return a copy of the string converted to lowercase.")
}

fn strip() -> Callable {
    let params = vec![
        text_param(),
        Parameter::new("chars", ParamType::Any).with_default(Value::Null),
    ];
    Callable::function("strip", params, |args: &[Value]| {
        check_arity(args, 1, 2)?;
        let text = string_arg(args, 0, "text")?;
        let stripped = match optional_string_arg(args, 1, "chars")? {
            Some(chars) => text.trim_matches(|c: char| chars.contains(c)),
            None => text.trim(),
        };
        Ok(json!(stripped))
    })
    .with_doc("Return a copy of the string with leading and trailing whitespace removed.\n\nIf chars is given, remove characters in chars instead.")
}

fn split() -> Callable {
    let params = vec![
        text_param(),
        Parameter::new("sep", ParamType::Any).with_default(Value::Null),
    ];
    Callable::function("split", params, |args: &[Value]| -> CallResult<Value> {
        check_arity(args, 1, 2)?;
        let text = string_arg(args, 0, "text")?;
        let parts: Vec<&str> = match optional_string_arg(args, 1, "sep")? {
            Some("") => return Err(invalid("sep", "non-empty separator")),
            Some(sep) => text.split(sep).collect(),
            None => text.split_whitespace().collect(),
        };
        Ok(json!(parts))
    })
    .with_doc("Return a list of the substrings in the string, using sep as the separator.\n\nWithout sep, splits on runs of whitespace.")
}

fn join() -> Callable {
    let params = vec![
        Parameter::new("parts", ParamType::Array),
        Parameter::new("sep", ParamType::String).with_default(json!("")),
    ];
    Callable::function("join", params, |args: &[Value]| -> CallResult<Value> {
        check_arity(args, 1, 2)?;
        let parts = arg(args, 0, "parts")?
            .as_array()
            .ok_or_else(|| invalid("parts", "array of strings"))?;
        let sep = if args.len() > 1 { string_arg(args, 1, "sep")? } else { "" };

        let strings = parts
            .iter()
            .map(|p| p.as_str().ok_or_else(|| invalid("parts", "array of strings")))
            .collect::<CallResult<Vec<_>>>()?;
        Ok(json!(strings.join(sep)))
    })
    .with_doc("Concatenate the strings in parts, inserting sep between them.")
}

fn replace() -> Callable {
    let params = vec![
        text_param(),
        Parameter::new("old", ParamType::String),
        Parameter::new("new", ParamType::String),
    ];
    Callable::function("replace", params, |args: &[Value]| {
        check_arity(args, 3, 3)?;
        let text = string_arg(args, 0, "text")?;
        let old = string_arg(args, 1, "old")?;
        let new = string_arg(args, 2, "new")?;
        Ok(json!(text.replace(old, new)))
    })
    .with_doc("Return a copy with all occurrences of substring old replaced by new.")
}

fn count() -> Callable {
    let params = vec![text_param(), Parameter::new("sub", ParamType::String)];
    Callable::function("count", params, |args: &[Value]| -> CallResult<Value> {
        check_arity(args, 2, 2)?;
        let text = string_arg(args, 0, "text")?;
        let sub = string_arg(args, 1, "sub")?;
        if sub.is_empty() {
            return Ok(json!(text.chars().count() + 1));
        }
        Ok(json!(text.matches(sub).count()))
    })
    .with_doc("Return the number of non-overlapping occurrences of sub in text.")
}

/// Stored under `shout`, but the callable itself has no name
fn shout() -> Callable {
    Callable::anonymous(vec![text_param()], |args: &[Value]| {
        check_arity(args, 1, 1)?;
        Ok(json!(format!("{}!", string_arg(args, 0, "text")?.to_uppercase())))
    })
}

pub(super) fn library() -> Library {
    Library::new("text")
        .with_doc("Common string operations.")
        .with_routine(upper())
        .with_routine(lower())
        .with_routine(strip())
        .with_routine(split())
        .with_routine(join())
        .with_routine(replace())
        .with_routine(count())
        .with_member("shout", Member::Routine(shout()))
        .with_member("Template", Member::Class("Template".to_string()))
        .with_constant("ascii_letters", json!("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> CallResult<Value> {
        match library().get(name) {
            Some(Member::Routine(c)) => c.call(args),
            _ => panic!("missing {}", name),
        }
    }

    #[test]
    fn test_routine_names_exclude_class_and_constant() {
        assert_eq!(
            library().routine_names(),
            vec!["count", "join", "lower", "replace", "shout", "split", "strip", "upper"]
        );
    }

    #[test]
    fn test_string_helpers() {
        assert_eq!(call("upper", &[json!("abc")]).unwrap(), json!("ABC"));
        assert_eq!(call("strip", &[json!("  hi ")]).unwrap(), json!("hi"));
        assert_eq!(call("strip", &[json!("xxhixx"), json!("x")]).unwrap(), json!("hi"));
        assert_eq!(call("split", &[json!("a b  c")]).unwrap(), json!(["a", "b", "c"]));
        assert_eq!(call("split", &[json!("a,b"), json!(",")]).unwrap(), json!(["a", "b"]));
        assert_eq!(call("join", &[json!(["a", "b"]), json!("-")]).unwrap(), json!("a-b"));
        assert_eq!(call("replace", &[json!("aaa"), json!("a"), json!("b")]).unwrap(), json!("bbb"));
        assert_eq!(call("count", &[json!("banana"), json!("an")]).unwrap(), json!(2));
    }

    #[test]
    fn test_shout_is_anonymous() {
        match library().get("shout") {
            Some(Member::Routine(c)) => {
                assert!(c.name().is_none());
                assert_eq!(c.call(&[json!("hey")]).unwrap(), json!("HEY!"));
            }
            _ => panic!("shout missing"),
        }
    }
}
