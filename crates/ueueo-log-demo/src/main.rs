//! ueueo-log demo - Drive the logging facade from the command line.
//!
//! # Usage
//!
//! ```bash
//! # One framed record with two caller frames and a JSON block
//! ueueo-log-demo emit --level info --methods 2 --json '{"ok":true}' request done
//!
//! # Many threads writing framed records at once
//! ueueo-log-demo burst --threads 8 --records 20
//!
//! # View configuration
//! ueueo-log-demo config show
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use ueueo_log::{facade, Level, LogConfig, TracingSink};

mod cli;
mod logging;

/// ueueo-log demo - Emit framed console and file log records.
#[derive(Parser, Debug)]
#[command(name = "ueueo-log-demo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output diagnostics in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Load settings from this file instead of the default location
    #[arg(long, global = true, env = "UEUEO_LOG_CONFIG")]
    config: Option<PathBuf>,

    /// Also forward every record to the diagnostics subscriber
    #[arg(long, global = true)]
    bridge: bool,

    /// Minimum severity to emit, overriding the config file
    #[arg(long, global = true, value_parser = parse_level)]
    threshold: Option<Level>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Emit a single record
    Emit(cli::emit::EmitArgs),

    /// Emit framed records from many threads at once
    Burst(cli::burst::BurstArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    tracing::debug!("ueueo-log v{}", ueueo_log::VERSION);

    let config_path = cli.config.as_deref().map(logging::expand_path);
    let config = match load_config(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(
                "Failed to load config: {e}. Using default configuration. \
                 Check your config file with `ueueo-log-demo config path`."
            );
            LogConfig::default()
        }
    };
    facade::init_from_config(config);
    if cli.bridge {
        facade::add_sink(Arc::new(TracingSink::new()));
    }
    if let Some(threshold) = cli.threshold {
        facade::configure(|config| {
            config.level(threshold);
        });
    }

    match cli.command {
        Commands::Emit(args) => cli::emit::execute(args),
        Commands::Burst(args) => cli::burst::execute(args),
        Commands::Config(args) => cli::config::execute(args, config_path.as_deref()),
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<LogConfig, ueueo_log::ConfigError> {
    match path {
        Some(path) => LogConfig::load_from(path),
        None => LogConfig::load(),
    }
}

fn parse_level(s: &str) -> Result<Level, String> {
    Level::parse(s).ok_or_else(|| format!("unknown level '{s}'"))
}
