//! YZQ-TV CLI - Command-line interface
//!
//! Runs the API server and offers offline maintenance of the history file.

mod commands;

use clap::Parser;
use yzqtv_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "yzqtv")]
#[command(about = "Search history API server for YZQ-TV")]
struct Cli {
    /// Console log level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value_t = CliLogLevel::Info, global = true)]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_tracing_level(), None)?;

    commands::handle_command(cli.command).await
}
