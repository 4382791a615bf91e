//! ueueo-log - Pretty console and file logging.
//!
//! Records are rendered either as a single line or as a framed block with
//! caller frames, queued appends and pretty-printed JSON, XML or object
//! payloads, then fanned out to every registered sink.
//!
//! # Architecture
//!
//! ```text
//! facade / macros → Printer → render (frame, stack header) → Sink (console, file, tracing, ...)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use ueueo_log::{facade, i, e};
//!
//! fn main() -> Result<(), ueueo_log::ConfigError> {
//!     facade::init_with("App", 1, false);
//!
//!     i!("starting {} workers", 4)?;
//!     facade::tag("Net").append_json(r#"{"status":200}"#).d("response")?;
//!     e!(err: &std::io::Error::other("disk full"), "saving state")?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod context;
pub mod error;
pub mod facade;
pub mod level;
pub mod pretty;
pub mod printer;
pub mod sink;
pub mod stack;

mod macros;

// Re-exports for convenient access
pub use config::{LogConfig, LogSettings, DEFAULT_TAG};
pub use error::ConfigError;
pub use level::{should_emit, Level};
pub use pretty::{PayloadFormatter, StandardFormatter};
pub use printer::Printer;
pub use sink::{ConsoleSink, FileSink, MemorySink, Sink, SinkLine, TracingSink};
pub use stack::{BacktraceSource, Frame, StackSource};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
