//! Recording logger

use parking_lot::Mutex;

use super::traits::Logger;

/// Severity of a recorded entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A single recorded log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
}

/// A logger that keeps every entry in memory
///
/// Useful for tests and for callers that want to surface build warnings in
/// their own UI.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded entries, oldest first
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Messages recorded at exactly `level`
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    /// Shorthand for the warning messages
    pub fn warnings(&self) -> Vec<String> {
        self.messages(LogLevel::Warn)
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.records.lock().push(LogRecord {
            level,
            message: message.to_string(),
        });
    }
}

impl Logger for MemoryLogger {
    fn debug(&self, message: &str) {
        self.push(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_records_in_order() {
        let logger = MemoryLogger::new();
        logger.info("starting");
        logger.warn("first");
        crate::log_warn!(logger, "second {}", 2);

        let records = logger.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].level, LogLevel::Info);
        assert_eq!(logger.warnings(), vec!["first".to_string(), "second 2".to_string()]);
    }

    #[test]
    fn test_memory_logger_clear() {
        let logger = MemoryLogger::new();
        logger.error("boom");
        logger.clear();
        assert!(logger.records().is_empty());
    }
}
