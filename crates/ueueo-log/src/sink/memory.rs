//! In-memory sink that keeps every dispatched line.

use std::sync::{Mutex, PoisonError};

use super::Sink;
use crate::level::Level;

/// One line as received by a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkLine {
    pub level: Level,
    pub tag: String,
    pub line: String,
}

/// Collects lines in arrival order.
///
/// Useful as a custom sink for embedding applications that want to show
/// recent log output, and for asserting on rendered records in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<SinkLine>>,
    file_backed: bool,
}

impl MemorySink {
    /// Create a sink that always receives lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that behaves like a file sink for routing purposes.
    pub fn file_backed() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            file_backed: true,
        }
    }

    /// Snapshot of every line received so far.
    pub fn lines(&self) -> Vec<SinkLine> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Only the text of each line.
    pub fn texts(&self) -> Vec<String> {
        self.lines().into_iter().map(|l| l.line).collect()
    }

    /// Drop everything received so far.
    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn push(&self, level: Level, tag: &str, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SinkLine {
                level,
                tag: tag.to_string(),
                line: line.to_string(),
            });
    }
}

impl Sink for MemorySink {
    fn verbose(&self, tag: &str, line: &str) {
        self.push(Level::Verbose, tag, line);
    }

    fn debug(&self, tag: &str, line: &str) {
        self.push(Level::Debug, tag, line);
    }

    fn info(&self, tag: &str, line: &str) {
        self.push(Level::Info, tag, line);
    }

    fn warn(&self, tag: &str, line: &str) {
        self.push(Level::Warn, tag, line);
    }

    fn error(&self, tag: &str, line: &str) {
        self.push(Level::Error, tag, line);
    }

    fn assert(&self, tag: &str, line: &str) {
        self.push(Level::Assert, tag, line);
    }

    fn is_file_backed(&self) -> bool {
        self.file_backed
    }
}
