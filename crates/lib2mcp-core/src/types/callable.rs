//! Callable values held by libraries

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::signature::Parameter;

/// Errors raised while invoking a callable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Invalid argument '{name}': expected {expected}")]
    InvalidArgument { name: String, expected: String },

    #[error("Expected {expected} positional arguments, got {got}")]
    Arity { expected: String, got: usize },

    #[error("Math domain error: {0}")]
    Domain(String),

    #[error("Numerical result out of range: {0}")]
    Overflow(String),

    #[error("Tool not found: {0}")]
    UnknownTool(String),

    #[error("{0}")]
    Other(String),
}

pub type CallResult<T> = Result<T, CallError>;

/// Native entry point: positional JSON arguments in, JSON value out
pub type NativeFn = Arc<dyn Fn(&[Value]) -> CallResult<Value> + Send + Sync>;

/// How much a callable reveals about its own parameters
#[derive(Debug, Clone, PartialEq)]
pub enum CallableKind {
    /// Parameters are fully declared
    Function(Vec<Parameter>),
    /// Native routine; parameters are only known through its text signature,
    /// e.g. `($module, x, /)`, if it has one at all
    Builtin { text_signature: Option<String> },
}

/// A routine exposed by a library
///
/// `name` is the callable's own identity, which can differ from the
/// attribute it is stored under. `None` means anonymous.
#[derive(Clone)]
pub struct Callable {
    name: Option<String>,
    doc: Option<String>,
    kind: CallableKind,
    func: NativeFn,
}

impl std::fmt::Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Callable {
    /// A routine with fully declared parameters
    pub fn function<F>(name: impl Into<String>, params: Vec<Parameter>, func: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            doc: None,
            kind: CallableKind::Function(params),
            func: Arc::new(func),
        }
    }

    /// A native routine described only by an optional text signature
    pub fn builtin<F>(name: impl Into<String>, text_signature: Option<&str>, func: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: Some(name.into()),
            doc: None,
            kind: CallableKind::Builtin {
                text_signature: text_signature.map(str::to_string),
            },
            func: Arc::new(func),
        }
    }

    /// A routine with no bindable name
    pub fn anonymous<F>(params: Vec<Parameter>, func: F) -> Self
    where
        F: Fn(&[Value]) -> CallResult<Value> + Send + Sync + 'static,
    {
        Self {
            name: None,
            doc: None,
            kind: CallableKind::Function(params),
            func: Arc::new(func),
        }
    }

    /// Attach documentation
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn kind(&self) -> &CallableKind {
        &self.kind
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.kind, CallableKind::Builtin { .. })
    }

    /// Shared handle to the native entry point
    pub fn handler(&self) -> NativeFn {
        Arc::clone(&self.func)
    }

    /// Invoke with positional arguments
    pub fn call(&self, args: &[Value]) -> CallResult<Value> {
        (self.func)(args)
    }
}
