//! CLI commands.

mod board;
mod book;
mod intro;
mod track;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::client::ApiClient;
use crate::output::OutputFormat;

/// shipdeck CLI - Drive the shipdeck gateway from the terminal.
#[derive(Debug, Parser)]
#[command(name = "shipdeck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: String,

    /// Gateway base URL.
    #[arg(
        long,
        global = true,
        env = "SHIPDECK_API_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage the scheduling board.
    Board(board::BoardCommand),

    /// Track an order by its tracking number.
    Track(track::TrackCommand),

    /// Book a shipment from a JSON form.
    Book(book::BookCommand),

    /// Inspect or acknowledge the intro disclaimer.
    Intro(intro::IntroCommand),

    /// Show CLI version.
    Version,
}

/// Context shared by all commands.
pub struct CommandContext {
    pub api_url: String,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create an API client for the configured gateway.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.api_url)
    }
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let format = match self.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        };

        let ctx = CommandContext {
            api_url: self.api_url,
            format,
        };

        match self.command {
            Commands::Board(cmd) => cmd.run(ctx).await,
            Commands::Track(cmd) => cmd.run(ctx).await,
            Commands::Book(cmd) => cmd.run(ctx).await,
            Commands::Intro(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("shipdeck {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}
