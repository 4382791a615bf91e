//! Log destinations.
//!
//! Every destination implements [`Sink`]: one method per severity, each
//! taking the decorated tag and a single already-rendered line. Sinks never
//! report errors back to the printer; any fault is swallowed here.
//!
//! - **console**: logcat-style lines on stderr
//! - **file**: per-tag, per-minute log files
//! - **bridge**: forwards lines into `tracing` events
//! - **memory**: keeps lines in memory (custom sinks, tests)

pub mod bridge;
pub mod console;
pub mod file;
pub mod memory;

pub use bridge::TracingSink;
pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::{MemorySink, SinkLine};

use crate::level::Level;

/// A destination capability that records one formatted line at a time.
///
/// Lines are delivered while the printer holds its dispatch lock, which is
/// not reentrant. A record a sink logs back into the printer that feeds it
/// (directly, or through a `tracing` layer that forwards into the facade)
/// is dropped instead of waiting on that lock.
pub trait Sink: Send + Sync {
    fn verbose(&self, tag: &str, line: &str);
    fn debug(&self, tag: &str, line: &str);
    fn info(&self, tag: &str, line: &str);
    fn warn(&self, tag: &str, line: &str);
    fn error(&self, tag: &str, line: &str);
    fn assert(&self, tag: &str, line: &str);

    /// File-backed sinks only receive lines when the record's resolved
    /// file-routing flag is set.
    fn is_file_backed(&self) -> bool {
        false
    }

    /// Route a line to the method matching `level`.
    fn write(&self, level: Level, tag: &str, line: &str) {
        match level {
            Level::Debug => self.debug(tag, line),
            Level::Info => self.info(tag, line),
            Level::Warn => self.warn(tag, line),
            Level::Error => self.error(tag, line),
            Level::Assert => self.assert(tag, line),
            Level::Verbose | Level::None => self.verbose(tag, line),
        }
    }
}

/// Everything before the first `[` of a tag.
///
/// Thread-decorated tags from the same logical tag share one base tag, even
/// when the thread name or the tag itself contains brackets.
pub fn base_tag(tag: &str) -> &str {
    tag.split('[').next().unwrap_or(tag)
}
