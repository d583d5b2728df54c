//! Intro disclaimer commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};

use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

const SESSION_ID_HEADER: &str = "x-session-id";

/// Intro disclaimer commands. With no subcommand, shows the disclaimer
/// state for a session (or mints a new session).
#[derive(Debug, Args)]
pub struct IntroCommand {
    /// Session ID (sess_...). Omit to start a fresh session.
    #[arg(long)]
    session: Option<String>,

    #[command(subcommand)]
    command: Option<IntroSubcommand>,
}

#[derive(Debug, Subcommand)]
enum IntroSubcommand {
    /// Acknowledge the disclaimer for a session.
    Ack(AckArgs),
}

#[derive(Debug, Args)]
struct AckArgs {
    /// Session ID (sess_...).
    #[arg(long)]
    session: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct IntroResponse {
    session_id: String,
    acknowledged: bool,
}

impl IntroCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            Some(IntroSubcommand::Ack(args)) => ack(ctx, args).await,
            None => show(ctx, self.session).await,
        }
    }
}

async fn show(ctx: CommandContext, session: Option<String>) -> Result<()> {
    let client = ctx.client()?;
    let response: IntroResponse = match session.as_deref() {
        Some(session) => {
            client
                .get_with_headers("/v1/intro", &[(SESSION_ID_HEADER, session)])
                .await?
        }
        None => client.get("/v1/intro").await?,
    };

    match ctx.format {
        OutputFormat::Json => print_single(&response, ctx.format),
        OutputFormat::Table => {
            println!(
                "Session {}: {}",
                response.session_id,
                if response.acknowledged {
                    "disclaimer acknowledged"
                } else {
                    "disclaimer pending"
                }
            );
        }
    }
    Ok(())
}

async fn ack(ctx: CommandContext, args: AckArgs) -> Result<()> {
    let client = ctx.client()?;
    client
        .post_unit("/v1/intro/ack", &[(SESSION_ID_HEADER, &args.session)])
        .await?;

    print_success(&format!("Disclaimer acknowledged for {}", args.session));
    Ok(())
}
