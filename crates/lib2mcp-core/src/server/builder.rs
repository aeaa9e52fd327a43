//! Building a tool server from a library specification

use std::sync::Arc;

use thiserror::Error;

use crate::config::{LibrarySpec, Selector, SpecError};
use crate::logging::{Logger, NoOpLogger, SharedLogger};
use crate::resolver::{import, resolve_in, ResolveError};
use crate::tools::{register, Registration, RegistrationFailure, ToolRegistry};

/// Name used when the caller does not supply one
pub const DEFAULT_SERVER_NAME: &str = "Library function server";

/// Fatal build errors
///
/// Per-function problems are not here; they end up in [`BuildReport`].
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Invalid library specification: {0}")]
    InvalidSpecification(#[from] SpecError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("No tools were registered; check the library specification")]
    EmptyServer,
}

pub type BuildResult<T> = Result<T, BuildError>;

/// A function that was resolved but could not be exposed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFunction {
    pub library: String,
    pub function: String,
    pub failure: RegistrationFailure,
}

impl std::fmt::Display for FailedFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Skipping function '{}' from '{}': {}", self.function, self.library, self.failure)
    }
}

/// What happened to every selected function
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Tool names, in registration order
    pub registered: Vec<String>,
    /// `library.attribute` of anonymous callables that were left out
    pub skipped: Vec<String>,
    /// Functions that could not be registered
    pub failures: Vec<FailedFunction>,
}

/// A populated registry ready to be served
#[derive(Debug, Clone)]
pub struct ToolServer {
    name: String,
    registry: Arc<ToolRegistry>,
    report: BuildReport,
}

impl ToolServer {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }
}

/// Drives resolution and registration for a whole [`LibrarySpec`]
///
/// # Example
///
/// ```
/// use lib2mcp_core::config::{LibrarySpec, Selector};
/// use lib2mcp_core::server::ServerBuilder;
///
/// let spec = LibrarySpec::new().with("math", Selector::One("sqrt".into()));
/// let server = ServerBuilder::default().build(&spec).unwrap();
/// assert_eq!(server.registry().tool_names(), vec!["sqrt"]);
/// ```
pub struct ServerBuilder {
    name: Option<String>,
    logger: SharedLogger,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new(Arc::new(NoOpLogger::new()))
    }
}

impl ServerBuilder {
    pub fn new(logger: SharedLogger) -> Self {
        Self { name: None, logger }
    }

    /// Set the server name; `None` keeps [`DEFAULT_SERVER_NAME`]
    pub fn with_name(mut self, name: Option<impl Into<String>>) -> Self {
        self.name = name.map(Into::into);
        self
    }

    /// Parse a YAML/JSON specification, validating every entry up front,
    /// then build
    pub fn build_from_yaml(&self, source: &str) -> BuildResult<ToolServer> {
        let spec = LibrarySpec::from_yaml_str(source)?;
        self.build(&spec)
    }

    /// Resolve and register every selected function
    ///
    /// Resolution errors abort immediately. Registration failures are
    /// collected and logged as warnings once all libraries are processed.
    pub fn build(&self, spec: &LibrarySpec) -> BuildResult<ToolServer> {
        let name = self.name.clone().unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string());
        let registry = Arc::new(ToolRegistry::new());
        let mut report = BuildReport::default();

        for (library, selector) in spec.entries() {
            let imported = import(library)?;
            let functions = match selector {
                Selector::All => imported.routine_names(),
                Selector::One(function) => vec![function.clone()],
                Selector::Many(functions) => functions.clone(),
            };
            crate::log_debug!(
                self.logger,
                "[ServerBuilder] Library '{}': {} function(s) selected",
                library,
                functions.len()
            );

            for function in functions {
                let callable = resolve_in(library, &imported, &function)?;
                match register(&callable, &registry) {
                    Registration::Registered { name } => report.registered.push(name),
                    Registration::Skipped => {
                        crate::log_debug!(
                            self.logger,
                            "[ServerBuilder] Skipping anonymous callable '{}.{}'",
                            library, function
                        );
                        report.skipped.push(format!("{}.{}", library, function));
                    }
                    Registration::Failed { failure, .. } => report.failures.push(FailedFunction {
                        library: library.to_string(),
                        function,
                        failure,
                    }),
                }
            }
        }

        for failure in &report.failures {
            self.logger.warn(&failure.to_string());
        }

        if registry.is_empty() {
            return Err(BuildError::EmptyServer);
        }

        crate::log_info!(
            self.logger,
            "[ServerBuilder] '{}' ready with {} tool(s): {}",
            name,
            registry.tool_count(),
            report.registered.join(", ")
        );

        Ok(ToolServer { name, registry, report })
    }
}

/// Build with the default logger and an optional server name
pub fn build(spec: &LibrarySpec, server_name: Option<&str>) -> BuildResult<ToolServer> {
    ServerBuilder::default().with_name(server_name).build(spec)
}
