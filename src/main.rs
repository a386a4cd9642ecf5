//! daqhid CLI
//!
//! Sends raw HID output/feature reports to USB DAQ devices and prints the
//! normalized (code, name, description) result triple.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List { daq_only } => commands::list(daq_only),
        Commands::Send {
            device,
            report_type,
            report_id,
            backend,
            bytes,
        } => commands::send(device, report_type, report_id, backend, &bytes, cli.json),
    }
}
