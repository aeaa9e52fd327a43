//! Logging abstractions
//!
//! The core never writes to stdout directly: the stdio transport owns it.
//! Everything goes through a [`Logger`] handed in by the caller.

mod traits;
mod noop;
mod console;
mod memory;

pub use traits::{Logger, SharedLogger};
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use memory::{LogLevel, LogRecord, MemoryLogger};
