//! # MFL Value Binary
//!
//! Command-line interface for position ratings and market value estimates.

use anyhow::Result;
use clap::Parser;
use market_value::cli::{Cli, CliHandler};
use market_value::logging::initialize_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli.log_level, cli.log_format)?;

    CliHandler::new().handle_command(cli.command)?;

    Ok(())
}
