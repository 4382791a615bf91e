//! The printer engine.
//!
//! For every terminal call the printer:
//! 1. consumes the calling thread's one-shot overrides,
//! 2. drops the record if it is below the configured threshold,
//! 3. resolves tag, method count and file routing,
//! 4. renders the record (single line or framed, with caller frames),
//! 5. dispatches each line to every eligible sink.
//!
//! Steps 4 and 5 run inside the printer's critical section so that a
//! framed record is always a contiguous block in every sink. The section is
//! not reentrant: a record a sink logs back into the same printer from the
//! dispatching thread is dropped.

mod render;

pub use render::{BOTTOM_BORDER, CONTENT_PREFIX, MIDDLE_BORDER, TOP_BORDER};

use serde::Serialize;
use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::config::{GeneralSettings, LogConfig, LogSettings, DEFAULT_TAG};
use crate::context;
use crate::error::ConfigError;
use crate::level::{should_emit, Level};
use crate::pretty::{PayloadFormatter, StandardFormatter};
use crate::sink::Sink;
use crate::stack::{BacktraceSource, StackSource};
use render::Record;

/// Placeholder for an empty final message.
pub const EMPTY_MESSAGE: &str = "Empty/NULL log message";

/// Placeholder for an error call with neither message nor error.
pub const NO_MESSAGE: &str = "No message/exception is set";

static NEXT_PRINTER_ID: AtomicU64 = AtomicU64::new(1);

/// Formats records and fans them out to the configured sinks.
pub struct Printer {
    id: u64,
    config: RwLock<LogConfig>,
    formatter: Arc<dyn PayloadFormatter>,
    stack: Arc<dyn StackSource>,
    dispatch: Mutex<()>,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(LogConfig::default())
    }
}

impl Printer {
    /// Create a printer that owns `config`.
    pub fn new(config: LogConfig) -> Self {
        Self {
            id: NEXT_PRINTER_ID.fetch_add(1, Ordering::Relaxed),
            config: RwLock::new(config),
            formatter: Arc::new(StandardFormatter),
            stack: Arc::new(BacktraceSource),
            dispatch: Mutex::new(()),
        }
    }

    /// Replace the payload formatter.
    pub fn with_formatter(mut self, formatter: impl PayloadFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Replace the caller-frame source.
    pub fn with_stack_source(mut self, source: impl StackSource + 'static) -> Self {
        self.stack = Arc::new(source);
        self
    }

    /// Mutate the configuration.
    ///
    /// Meant for startup; records already being dispatched keep the sinks
    /// they resolved.
    pub fn configure<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut LogConfig) -> R,
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut config)
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> LogSettings {
        self.read_config().settings().clone()
    }

    fn read_config(&self) -> std::sync::RwLockReadGuard<'_, LogConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> (GeneralSettings, Vec<Arc<dyn Sink>>) {
        let config = self.read_config();
        (config.settings().general.clone(), config.sinks().to_vec())
    }

    // === One-shot overrides ===

    /// Use `tag` for the next record on this thread.
    pub fn tag(&self, tag: impl Into<String>) -> &Self {
        let tag = tag.into();
        context::update(self.id, |ctx| ctx.tag = Some(tag));
        self
    }

    /// Show `method_count` caller frames in the next record on this thread.
    pub fn method(&self, method_count: i32) -> &Self {
        context::update(self.id, |ctx| ctx.method_count = Some(method_count));
        self
    }

    /// Route (or not) the next record on this thread to file-backed sinks.
    pub fn file(&self, print_to_file: bool) -> &Self {
        context::update(self.id, |ctx| ctx.print_to_file = Some(print_to_file));
        self
    }

    // === Appends ===

    /// Queue a message block for the next record on this thread.
    pub fn append(&self, message: impl Into<String>) -> &Self {
        self.queue(message.into());
        self
    }

    /// Queue a pretty-printed JSON block.
    pub fn append_json(&self, json: &str) -> &Self {
        if let Some(message) = self.format_payload(|f| f.json(json)) {
            self.queue(message);
        }
        self
    }

    /// Queue a pretty-printed XML block.
    pub fn append_xml(&self, xml: &str) -> &Self {
        if let Some(message) = self.format_payload(|f| f.xml(xml)) {
            self.queue(message);
        }
        self
    }

    /// Queue a pretty-printed dump of a serializable object.
    pub fn append_object<T: Serialize + ?Sized>(&self, object: &T) -> &Self {
        if let Some(message) = self.format_payload(|f| f.object(serde_json::to_value(object))) {
            self.queue(message);
        }
        self
    }

    fn queue(&self, message: String) {
        if !message.is_empty() {
            context::update(self.id, |ctx| ctx.appends.push(message));
        }
    }

    /// Payloads are only ever emitted at DEBUG, so skip the formatting work
    /// entirely when DEBUG is filtered out.
    fn format_payload<F>(&self, f: F) -> Option<String>
    where
        F: FnOnce(&dyn PayloadFormatter) -> String,
    {
        let threshold = self.read_config().settings().general.level;
        if !should_emit(Level::Debug, threshold) {
            return None;
        }
        Some(f(self.formatter.as_ref()))
    }

    // === Terminal calls ===

    pub fn v(&self, message: impl Into<String>) -> Result<(), ConfigError> {
        self.log(Level::Verbose, message.into())
    }

    pub fn d(&self, message: impl Into<String>) -> Result<(), ConfigError> {
        self.log(Level::Debug, message.into())
    }

    pub fn i(&self, message: impl Into<String>) -> Result<(), ConfigError> {
        self.log(Level::Info, message.into())
    }

    pub fn w(&self, message: impl Into<String>) -> Result<(), ConfigError> {
        self.log(Level::Warn, message.into())
    }

    pub fn e(&self, message: impl Into<String>) -> Result<(), ConfigError> {
        let message: String = message.into();
        self.error_with(None, Some(&message))
    }

    /// Log at ASSERT ("what a terrible failure").
    pub fn wtf(&self, message: impl Into<String>) -> Result<(), ConfigError> {
        self.log(Level::Assert, message.into())
    }

    /// Log an error together with its source chain.
    ///
    /// With both present the message reads `<message> : <error chain>`;
    /// with only an error, the error's own description is used.
    pub fn error_with(
        &self,
        error: Option<&dyn Error>,
        message: Option<&str>,
    ) -> Result<(), ConfigError> {
        let message = match (error, message) {
            (Some(error), Some(message)) => format!("{message} : {}", error_chain(error)),
            (Some(error), None) => error.to_string(),
            (None, Some(message)) => message.to_string(),
            (None, None) => NO_MESSAGE.to_string(),
        };
        self.log(Level::Error, message)
    }

    /// Pretty-print a JSON document at DEBUG.
    pub fn json(&self, json: &str) -> Result<(), ConfigError> {
        let message = self.format_payload(|f| f.json(json)).unwrap_or_default();
        self.log(Level::Debug, message)
    }

    /// Pretty-print an XML document at DEBUG.
    pub fn xml(&self, xml: &str) -> Result<(), ConfigError> {
        let message = self.format_payload(|f| f.xml(xml)).unwrap_or_default();
        self.log(Level::Debug, message)
    }

    /// Pretty-print a serializable object at DEBUG.
    pub fn object<T: Serialize + ?Sized>(&self, object: &T) -> Result<(), ConfigError> {
        let message = self
            .format_payload(|f| f.object(serde_json::to_value(object)))
            .unwrap_or_default();
        self.log(Level::Debug, message)
    }

    fn log(&self, level: Level, message: String) -> Result<(), ConfigError> {
        let overrides = context::take(self.id);
        let (general, sinks) = self.snapshot();

        if !should_emit(level, general.level) {
            return Ok(());
        }

        let method_count = overrides.method_count.unwrap_or(general.method_count);
        let method_count = usize::try_from(method_count)
            .map_err(|_| ConfigError::NegativeMethodCount(method_count))?;

        let mut tag = resolve_tag(overrides.tag, &general.tag);
        if general.show_thread_info {
            tag.push_str(&format!("[{}]", thread_label()));
        }

        let record = Record {
            level,
            tag,
            method_count,
            print_to_file: overrides.print_to_file.unwrap_or(general.print_to_file),
            message: if message.is_empty() {
                EMPTY_MESSAGE.to_string()
            } else {
                message
            },
            appends: overrides.appends,
        };

        let Some(_scope) = context::enter_dispatch(self.id) else {
            tracing::debug!("Dropped a record logged from inside one of the printer's sinks");
            return Ok(());
        };
        let _guard = self.dispatch.lock().unwrap_or_else(PoisonError::into_inner);
        let frames = if record.is_framed() && record.needs_stack() {
            self.stack.capture()
        } else {
            Vec::new()
        };
        for line in render::render(&record, &frames) {
            dispatch(&sinks, &record, &line);
        }
        Ok(())
    }
}

/// Override, then configured tag, then the built-in default.
fn resolve_tag(tag_override: Option<String>, configured: &str) -> String {
    match tag_override {
        Some(tag) if !tag.is_empty() => tag,
        _ if !configured.is_empty() => configured.to_string(),
        _ => DEFAULT_TAG.to_string(),
    }
}

fn thread_label() -> String {
    let thread = std::thread::current();
    match thread.name() {
        Some(name) => name.to_string(),
        None => format!("{:?}", thread.id()),
    }
}

fn error_chain(error: &dyn Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(&format!("\nCaused by: {cause}"));
        source = cause.source();
    }
    rendered
}

/// File-backed sinks only see the line when the record routes to files.
fn dispatch(sinks: &[Arc<dyn Sink>], record: &Record, line: &str) {
    for sink in sinks {
        if !sink.is_file_backed() || record.print_to_file {
            sink.write(record.level, &record.tag, line);
        }
    }
}
