//! Configuration
//!
//! - `LibrarySpec`: which functions of which libraries to expose, parsed from
//!   YAML/JSON or from `lib:func1,func2` command line entries
//! - `FileConfigProvider`: YAML config file (user level)

mod error;
mod file;
mod spec;

pub use error::{ConfigError, ConfigResult};
pub use file::{ConfigFile, FileConfigProvider, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TRANSPORT};
pub use spec::{parse_library_functions, LibrarySpec, Selector, SpecError, SpecResult};
