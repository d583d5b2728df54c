//! shipdeck - CLI for the shipdeck logistics demo
//!
//! Drives the gateway API from the terminal: the scheduling board,
//! tracking lookups, shipment booking, and the intro gate.

use anyhow::Result;
use clap::Parser;

mod client;
mod commands;
mod error;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Run the command
    if let Err(e) = cli.run().await {
        // Print error in a user-friendly way
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
