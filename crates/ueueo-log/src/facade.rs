//! Process-wide convenience entry points.
//!
//! Every function forwards to one shared [`Printer`], created with the
//! default configuration on first use. Call one of the `init*` functions at
//! startup to change the defaults.
//!
//! ```rust,ignore
//! use ueueo_log::facade;
//!
//! facade::init_with("App", 2, false);
//! facade::tag("Net").append_json(body).d("response")?;
//! ueueo_log::i!("connected to {} in {}ms", host, elapsed);
//! ```

use serde::Serialize;
use std::error::Error;
use std::sync::{Arc, OnceLock};

use crate::config::LogConfig;
use crate::error::ConfigError;
use crate::printer::Printer;
use crate::sink::Sink;

static PRINTER: OnceLock<Printer> = OnceLock::new();

/// The shared printer.
pub fn printer() -> &'static Printer {
    PRINTER.get_or_init(Printer::default)
}

/// Set the global tag.
pub fn init(tag: &str) {
    printer().configure(|config| {
        config.tag(tag);
    });
}

/// Set the global tag, method count and file routing.
pub fn init_with(tag: &str, method_count: i32, print_to_file: bool) {
    printer().configure(|config| {
        config
            .tag(tag)
            .method_count(method_count)
            .print_to_file(print_to_file);
    });
}

/// Replace the whole configuration (settings and sinks).
pub fn init_from_config(new_config: LogConfig) {
    printer().configure(|config| *config = new_config);
}

/// Register an additional sink.
pub fn add_sink(sink: Arc<dyn Sink>) {
    printer().configure(|config| {
        config.add_sink(sink);
    });
}

/// Mutate the global configuration.
pub fn configure<F, R>(f: F) -> R
where
    F: FnOnce(&mut LogConfig) -> R,
{
    printer().configure(f)
}

pub fn tag(tag: impl Into<String>) -> &'static Printer {
    printer().tag(tag)
}

pub fn method(method_count: i32) -> &'static Printer {
    printer().method(method_count)
}

pub fn file(print_to_file: bool) -> &'static Printer {
    printer().file(print_to_file)
}

pub fn append(message: impl Into<String>) -> &'static Printer {
    printer().append(message)
}

pub fn append_json(json: &str) -> &'static Printer {
    printer().append_json(json)
}

pub fn append_xml(xml: &str) -> &'static Printer {
    printer().append_xml(xml)
}

pub fn append_object<T: Serialize + ?Sized>(object: &T) -> &'static Printer {
    printer().append_object(object)
}

pub fn v(message: impl Into<String>) -> Result<(), ConfigError> {
    printer().v(message)
}

pub fn d(message: impl Into<String>) -> Result<(), ConfigError> {
    printer().d(message)
}

pub fn i(message: impl Into<String>) -> Result<(), ConfigError> {
    printer().i(message)
}

pub fn w(message: impl Into<String>) -> Result<(), ConfigError> {
    printer().w(message)
}

pub fn e(message: impl Into<String>) -> Result<(), ConfigError> {
    printer().e(message)
}

pub fn error_with(error: Option<&dyn Error>, message: Option<&str>) -> Result<(), ConfigError> {
    printer().error_with(error, message)
}

pub fn wtf(message: impl Into<String>) -> Result<(), ConfigError> {
    printer().wtf(message)
}

pub fn json(json: &str) -> Result<(), ConfigError> {
    printer().json(json)
}

pub fn xml(xml: &str) -> Result<(), ConfigError> {
    printer().xml(xml)
}

pub fn object<T: Serialize + ?Sized>(object: &T) -> Result<(), ConfigError> {
    printer().object(object)
}
