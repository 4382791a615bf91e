//! Diagnostics initialization for the demo binary.
//!
//! The demo's own diagnostics (and records forwarded with `--bridge`) go
//! through `tracing`; the framed records themselves are written by the
//! facade's console and file sinks.

use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the diagnostics subscriber.
///
/// # Arguments
///
/// * `verbose` - If true, enables DEBUG level diagnostics; otherwise INFO level.
/// * `json_format` - If true, outputs structured JSON; otherwise human-readable.
///
/// # Notes
///
/// - Output goes to stderr, next to the console sink
/// - The RUST_LOG environment variable can override the level
pub fn init(verbose: bool, json_format: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}
