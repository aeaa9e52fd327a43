//! Fault-tolerant registration of a single callable
//!
//! Registration never fails outward. Every outcome, including failures, comes
//! back as a [`Registration`] value so the caller can keep going.

use thiserror::Error;

use super::adapter::{adapt, AdaptError};
use super::registry::{RegistryError, ToolRegistry};
use super::schema::SchemaError;
use crate::types::Callable;

/// Why a named callable was not registered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationFailure {
    #[error("signature unknown ({0})")]
    SignatureUnknown(String),

    #[error("schema generation failed: {0}")]
    SchemaGeneration(SchemaError),

    #[error("registration failed: {0}")]
    Registration(String),
}

/// Outcome of registering one callable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The callable is now a tool under `name`
    Registered { name: String },
    /// The callable is anonymous and was left out
    Skipped,
    /// The callable could not be exposed
    Failed {
        name: String,
        failure: RegistrationFailure,
    },
}

impl Registration {
    pub fn is_registered(&self) -> bool {
        matches!(self, Registration::Registered { .. })
    }

    /// Warning text for a failed registration
    pub fn warning(&self) -> Option<String> {
        match self {
            Registration::Failed { name, failure } => {
                Some(format!("Skipping function '{}': {}", name, failure))
            }
            _ => None,
        }
    }
}

/// Register `callable` as a tool in `registry`
///
/// Anonymous callables are skipped. Builtins go through the signature
/// adapter first. Adapter, schema and registry errors all become
/// [`Registration::Failed`] and leave the registry untouched.
pub fn register(callable: &Callable, registry: &ToolRegistry) -> Registration {
    let Some(name) = callable.name() else {
        return Registration::Skipped;
    };
    let failed = |failure| Registration::Failed {
        name: name.to_string(),
        failure,
    };

    let signature = match adapt(callable) {
        Ok(signature) => signature,
        Err(AdaptError::SignatureUnknown { reason, .. }) => {
            return failed(RegistrationFailure::SignatureUnknown(reason));
        }
    };

    match registry.add_tool(signature, callable.handler()) {
        Ok(info) => Registration::Registered { name: info.name },
        Err(RegistryError::Schema(err)) => failed(RegistrationFailure::SchemaGeneration(err)),
        Err(other) => failed(RegistrationFailure::Registration(other.to_string())),
    }
}
