//! conform: validate JSON data against a schema document.
//!
//! Usage:
//!   conform --schema catalogue.toml --input items.json [--config validator.toml]
//!
//! Prints one line per converted record. Any validation failure is reported
//! with the property and element path that led to it, and the process exits
//! with a non-zero status.

use anyhow::Result;
use clap::Parser;
use conform_cli::{run, Args};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let report = run(&args)?;
    print!("{report}");
    Ok(())
}
