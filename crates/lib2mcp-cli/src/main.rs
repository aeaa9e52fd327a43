//! lib2mcp command line
//!
//! Builds a tool server from a library specification and serves it over MCP.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use lib2mcp_core::config::{ConfigError, ConfigFile, FileConfigProvider};
use lib2mcp_core::mcp::{serve, McpToolService, ServeError, ServeOptions, Transport};
use lib2mcp_core::{
    enumerate_functions, parse_library_functions, BuildError, ConsoleLogger, Logger,
    ResolveError, ServerBuilder, SharedLogger, SpecError,
};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "lib2mcp")]
#[command(about = "Serve library functions as MCP tools", long_about = None)]
struct Cli {
    /// Print debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a server from the selected functions and serve it
    Run {
        /// Entries of the form `lib`, `lib:func` or `lib:func1,func2`
        #[arg(short = 'l', long = "library-functions", num_args = 1..)]
        library_functions: Vec<String>,

        /// Server name reported to clients
        #[arg(short, long)]
        name: Option<String>,

        /// `stdio` or `streamable-http`
        #[arg(short, long)]
        transport: Option<String>,

        /// Bind host for the HTTP transport
        #[arg(long)]
        host: Option<String>,

        /// Bind port for the HTTP transport
        #[arg(short, long)]
        port: Option<u16>,

        /// YAML config file (defaults to the user config if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the functions each library exposes
    List {
        #[arg(required = true)]
        libraries: Vec<String>,
    },

    /// Print the version
    Version,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid library specification: {0}")]
    Spec(#[from] SpecError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Serve(#[from] ServeError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger: SharedLogger = Arc::new(ConsoleLogger::new().verbose(cli.verbose));

    let result = match cli.command {
        Command::Run {
            library_functions,
            name,
            transport,
            host,
            port,
            config,
        } => {
            let overrides = ConfigFile {
                name,
                transport,
                host,
                port,
                libraries: Default::default(),
            };
            run(&library_functions, overrides, config, logger.clone()).await
        }
        Command::List { libraries } => list(&libraries),
        Command::Version => {
            println!("lib2mcp {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            lib2mcp_core::log_error!(logger, "{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load the named config file, or the user config if it exists
fn load_config(path: Option<PathBuf>) -> Result<ConfigFile, CliError> {
    match path {
        Some(path) => Ok(FileConfigProvider::new(path).load_required()?),
        None => {
            let provider = FileConfigProvider::user();
            if provider.exists() {
                Ok(provider.load()?)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}

async fn run(
    entries: &[String],
    overrides: ConfigFile,
    config: Option<PathBuf>,
    logger: SharedLogger,
) -> Result<(), CliError> {
    let file = load_config(config)?;

    // CLI entries come after the file's
    let mut spec = file.library_spec()?;
    spec.merge(parse_library_functions(entries)?);

    let name = overrides.name.or_else(|| file.name.clone());
    let transport: Transport = overrides
        .transport
        .as_deref()
        .unwrap_or(file.transport_or_default())
        .parse()?;
    let options = ServeOptions {
        transport,
        host: overrides.host.unwrap_or_else(|| file.host_or_default().to_string()),
        port: overrides.port.unwrap_or(file.port_or_default()),
    };

    let server = ServerBuilder::new(logger.clone()).with_name(name).build(&spec)?;
    let service = McpToolService::new(&server, logger.clone());
    serve(service, &options, logger).await?;
    Ok(())
}

fn list(libraries: &[String]) -> Result<(), CliError> {
    for library in libraries {
        println!("{}:", library);
        for function in enumerate_functions(library)? {
            println!("  {}", function);
        }
    }
    Ok(())
}
