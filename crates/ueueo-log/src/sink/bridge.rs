//! Sink that forwards rendered lines into the `tracing` ecosystem.

use super::Sink;

/// Re-emits every line as a `tracing` event with the tag as a field.
///
/// Lets applications that already run a `tracing-subscriber` collect the
/// framed output alongside their other events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for TracingSink {
    fn verbose(&self, tag: &str, line: &str) {
        tracing::trace!(target: "ueueo_log", tag = %tag, "{}", line);
    }

    fn debug(&self, tag: &str, line: &str) {
        tracing::debug!(target: "ueueo_log", tag = %tag, "{}", line);
    }

    fn info(&self, tag: &str, line: &str) {
        tracing::info!(target: "ueueo_log", tag = %tag, "{}", line);
    }

    fn warn(&self, tag: &str, line: &str) {
        tracing::warn!(target: "ueueo_log", tag = %tag, "{}", line);
    }

    fn error(&self, tag: &str, line: &str) {
        tracing::error!(target: "ueueo_log", tag = %tag, "{}", line);
    }

    fn assert(&self, tag: &str, line: &str) {
        tracing::error!(target: "ueueo_log", tag = %tag, assert = true, "{}", line);
    }
}
