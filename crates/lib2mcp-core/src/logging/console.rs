//! Console logger implementation

use super::traits::Logger;

/// A logger that writes every level to stderr
///
/// stdout is reserved for the stdio MCP transport, so even `info` lines go to
/// stderr here.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    prefix: String,
    verbose: bool,
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleLogger {
    /// Create a console logger with the default prefix, debug output off
    pub fn new() -> Self {
        Self {
            prefix: "[lib2mcp]".to_string(),
            verbose: false,
        }
    }

    /// Create a console logger with a custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            verbose: false,
        }
    }

    /// Enable or disable debug output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn emit(&self, level: &str, message: &str) {
        eprintln!("{} {}: {}", self.prefix, level, message);
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        if self.verbose {
            self.emit("DEBUG", message);
        }
    }

    fn info(&self, message: &str) {
        self.emit("INFO", message);
    }

    fn warn(&self, message: &str) {
        self.emit("WARN", message);
    }

    fn error(&self, message: &str) {
        self.emit("ERROR", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_logger_creation() {
        let logger = ConsoleLogger::new();
        assert_eq!(logger.prefix, "[lib2mcp]");
        assert!(!logger.verbose);

        let custom = ConsoleLogger::with_prefix("[tools]").verbose(true);
        assert_eq!(custom.prefix, "[tools]");
        assert!(custom.verbose);
    }

    #[test]
    fn test_console_logger_logs() {
        let logger = ConsoleLogger::new().verbose(true);
        logger.debug("debug message");
        logger.info("info message");
        logger.warn("warn message");
        logger.error("error message");
    }
}
