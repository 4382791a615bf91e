//! The `emit` command: one record through the shared printer.

use clap::{Args, ValueEnum};
use serde::Serialize;
use ueueo_log::{facade, ConfigError, Level, Printer};

/// Arguments for the `emit` command.
#[derive(Args, Debug)]
pub struct EmitArgs {
    /// Message words, joined with spaces
    pub message: Vec<String>,

    /// Record severity
    #[arg(short, long, value_enum, default_value = "debug")]
    pub level: LevelArg,

    /// Tag for this record only
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Caller frames to show for this record only
    #[arg(short, long, allow_hyphen_values = true)]
    pub methods: Option<i32>,

    /// Also route this record to file sinks
    #[arg(short, long)]
    pub file: bool,

    /// JSON document to append before the message
    #[arg(long)]
    pub json: Option<String>,

    /// XML document to append before the message
    #[arg(long)]
    pub xml: Option<String>,

    /// Append a sample serialized object before the message
    #[arg(long)]
    pub object: bool,
}

/// Record severities accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LevelArg {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Assert,
}

impl From<LevelArg> for Level {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Verbose => Level::Verbose,
            LevelArg::Debug => Level::Debug,
            LevelArg::Info => Level::Info,
            LevelArg::Warn => Level::Warn,
            LevelArg::Error => Level::Error,
            LevelArg::Assert => Level::Assert,
        }
    }
}

#[derive(Serialize)]
struct SampleSession {
    user: &'static str,
    roles: Vec<&'static str>,
    active: bool,
}

impl SampleSession {
    fn new() -> Self {
        Self {
            user: "ada",
            roles: vec!["admin", "ops"],
            active: true,
        }
    }
}

/// Execute the emit command.
pub fn execute(args: EmitArgs) -> anyhow::Result<()> {
    emit(facade::printer(), &args)?;
    Ok(())
}

fn emit(printer: &Printer, args: &EmitArgs) -> Result<(), ConfigError> {
    if let Some(tag) = &args.tag {
        printer.tag(tag.as_str());
    }
    if let Some(methods) = args.methods {
        printer.method(methods);
    }
    if args.file {
        printer.file(true);
    }
    if let Some(json) = &args.json {
        printer.append_json(json);
    }
    if let Some(xml) = &args.xml {
        printer.append_xml(xml);
    }
    if args.object {
        printer.append_object(&SampleSession::new());
    }

    let message = args.message.join(" ");
    tracing::debug!("Emitting {:?} record", args.level);
    match Level::from(args.level) {
        Level::Verbose => printer.v(message),
        Level::Debug => printer.d(message),
        Level::Info => printer.i(message),
        Level::Warn => printer.w(message),
        Level::Error => printer.e(message),
        _ => printer.wtf(message),
    }
}
