//! `token`: token type numbers and classification helpers

use serde_json::{json, Map, Value};

use super::{check_arity, integer_arg};
use crate::library::Library;
use crate::types::{CallResult, Callable, ParamType, Parameter};

const ENDMARKER: i64 = 0;
const NT_OFFSET: i64 = 256;

const TOKENS: &[(&str, i64)] = &[
    ("ENDMARKER", ENDMARKER),
    ("NAME", 1),
    ("NUMBER", 2),
    ("STRING", 3),
    ("NEWLINE", 4),
    ("INDENT", 5),
    ("DEDENT", 6),
    ("LPAR", 7),
    ("RPAR", 8),
    ("LSQB", 9),
    ("RSQB", 10),
    ("COLON", 11),
    ("COMMA", 12),
    ("SEMI", 13),
    ("PLUS", 14),
    ("MINUS", 15),
    ("STAR", 16),
    ("SLASH", 17),
    ("OP", 55),
    ("COMMENT", 64),
    ("NL", 65),
    ("ERRORTOKEN", 66),
    ("ENCODING", 67),
];

fn predicate(name: &'static str, doc: &str, test: fn(i64) -> bool) -> Callable {
    Callable::function(
        name,
        vec![Parameter::new("x", ParamType::Integer)],
        move |args: &[Value]| -> CallResult<Value> {
            check_arity(args, 1, 1)?;
            Ok(json!(test(integer_arg(args, 0, "x")?)))
        },
    )
    .with_doc(doc)
}

pub(super) fn library() -> Library {
    let mut tok_name = Map::new();
    let mut lib = Library::new("token")
        .with_doc("Token constants.")
        .with_routine(predicate("ISTERMINAL", "Return true for terminal token values.", |x| x < NT_OFFSET))
        .with_routine(predicate("ISNONTERMINAL", "Return true for non-terminal token values.", |x| x >= NT_OFFSET))
        .with_routine(predicate("ISEOF", "Return true if x is the marker indicating the end of input.", |x| x == ENDMARKER))
        .with_constant("NT_OFFSET", json!(NT_OFFSET));

    for (name, value) in TOKENS {
        tok_name.insert(value.to_string(), json!(name));
        lib = lib.with_constant(*name, json!(value));
    }

    lib.with_constant("tok_name", Value::Object(tok_name))
}
