//! The `burst` command: framed records from many threads at once.
//!
//! Every record carries an append block and a two-line message, so any
//! interleaving between threads would be visible in the output.

use clap::Args;
use std::time::Instant;
use ueueo_log::{facade, ConfigError, Printer};

/// Arguments for the `burst` command.
#[derive(Args, Debug)]
pub struct BurstArgs {
    /// Number of writer threads
    #[arg(short, long, default_value = "4")]
    pub threads: usize,

    /// Records written by each thread
    #[arg(short, long, default_value = "10")]
    pub records: usize,

    /// Caller frames shown in each record
    #[arg(short, long, default_value = "1")]
    pub methods: i32,
}

/// Execute the burst command.
pub fn execute(args: BurstArgs) -> anyhow::Result<()> {
    if args.threads == 0 {
        anyhow::bail!("--threads must be > 0");
    }

    let start = Instant::now();
    burst(facade::printer(), &args)?;
    tracing::info!(
        "Wrote {} records from {} threads in {:?}",
        args.threads * args.records,
        args.threads,
        start.elapsed()
    );
    Ok(())
}

fn burst(printer: &Printer, args: &BurstArgs) -> anyhow::Result<()> {
    std::thread::scope(|scope| -> anyhow::Result<()> {
        let workers: Vec<_> = (0..args.threads)
            .map(|t| {
                std::thread::Builder::new()
                    .name(format!("burst-{t}"))
                    .spawn_scoped(scope, move || write_records(printer, t, args))
            })
            .collect::<Result<_, _>>()?;

        for worker in workers {
            match worker.join() {
                Ok(result) => result?,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok(())
    })
}

fn write_records(printer: &Printer, thread: usize, args: &BurstArgs) -> Result<(), ConfigError> {
    for record in 0..args.records {
        printer
            .method(args.methods)
            .append(format!("thread {thread} record {record}"))
            .d(format!(
                "first line of {thread}/{record}\nsecond line of {thread}/{record}"
            ))?;
    }
    Ok(())
}
