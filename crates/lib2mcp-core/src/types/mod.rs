//! Core types shared by the catalog, the adapter and the tool registry

mod callable;
mod signature;

pub use callable::{Callable, CallableKind, CallError, CallResult, NativeFn};
pub use signature::{ParamKind, ParamType, Parameter, ToolSignature};
