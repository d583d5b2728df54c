//! Scheduling board commands.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_output, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Board commands.
#[derive(Debug, Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    command: BoardSubcommand,
}

#[derive(Debug, Subcommand)]
enum BoardSubcommand {
    /// Show the board: pool, calendar weeks, and any notice.
    Show,

    /// Add a package to the pool.
    Add,

    /// Delete a package from the pool.
    Remove(PackageArg),

    /// Move a scheduled package back into the pool.
    Unschedule(PackageArg),

    /// Drag a package onto a week or to a new pool position.
    Move(MoveArgs),

    /// Dismiss the current notice.
    Dismiss(DismissArgs),
}

#[derive(Debug, Args)]
struct PackageArg {
    /// Package ID (pkg_...).
    package: String,
}

#[derive(Debug, Args)]
struct MoveArgs {
    /// Package ID (pkg_...).
    package: String,

    /// Destination week number.
    #[arg(long, conflicts_with = "pool_index")]
    week: Option<u32>,

    /// Destination position within the pool.
    #[arg(long)]
    pool_index: Option<usize>,

    /// Position the package held when the drag started. Defaults to its
    /// current pool position.
    #[arg(long)]
    source_index: Option<usize>,
}

#[derive(Debug, Args)]
struct DismissArgs {
    /// Notice sequence number (shown in `board show`).
    seq: u64,
}

impl BoardCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            BoardSubcommand::Show => show_board(ctx).await,
            BoardSubcommand::Add => add_package(ctx).await,
            BoardSubcommand::Remove(args) => remove_package(ctx, args).await,
            BoardSubcommand::Unschedule(args) => unschedule_package(ctx, args).await,
            BoardSubcommand::Move(args) => move_package(ctx, args).await,
            BoardSubcommand::Dismiss(args) => dismiss_notice(ctx, args).await,
        }
    }
}

// =============================================================================
// API types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Tabled)]
struct PackageBody {
    #[tabled(rename = "Number")]
    number: u32,

    #[tabled(rename = "Title")]
    title: String,

    #[tabled(rename = "ID")]
    id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScheduledBody {
    id: String,
    number: u32,
    title: String,
    week: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WeekBody {
    number: u32,
    start: String,
    end: String,
    packages: Vec<ScheduledBody>,
    remaining_capacity: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct NoticeBody {
    seq: u64,
    message: String,
    posted_at: String,
    expires_at: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct BoardResponse {
    pool: Vec<PackageBody>,
    weeks: Vec<WeekBody>,
    #[serde(default)]
    selected: Option<ScheduledBody>,
    #[serde(default)]
    notice: Option<NoticeBody>,
    week_capacity: usize,
}

#[derive(Debug, Serialize)]
struct MoveTarget {
    zone: String,
    index: usize,
}

#[derive(Debug, Serialize)]
struct MoveRequest {
    package_id: String,
    source_index: usize,
    destination: Option<MoveTarget>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MoveResponse {
    outcome: String,
    #[serde(default)]
    scheduled: Option<ScheduledBody>,
}

// =============================================================================
// Handlers
// =============================================================================

async fn fetch_board(ctx: &CommandContext) -> Result<BoardResponse, CliError> {
    ctx.client()?.get("/v1/board").await
}

/// Show the board.
async fn show_board(ctx: CommandContext) -> Result<()> {
    let board = fetch_board(&ctx).await?;

    match ctx.format {
        OutputFormat::Json => print_single(&board, ctx.format),
        OutputFormat::Table => {
            println!("{}", "Unscheduled packages".bold());
            print_output(&board.pool, ctx.format);

            for week in &board.weeks {
                println!(
                    "\n{} {} ({} to {}) - {}/{} slots free",
                    "Week".bold(),
                    week.number,
                    week.start,
                    week.end,
                    week.remaining_capacity,
                    board.week_capacity,
                );
                for package in &week.packages {
                    println!("  {} ({})", package.title, package.id);
                }
            }

            if let Some(selected) = &board.selected {
                println!(
                    "\nSelected: {} on week {}",
                    selected.title, selected.week
                );
            }
            if let Some(notice) = &board.notice {
                println!(
                    "\n{} {} (seq {})",
                    "Notice:".yellow().bold(),
                    notice.message,
                    notice.seq
                );
            }
        }
    }
    Ok(())
}

/// Add a package to the pool.
async fn add_package(ctx: CommandContext) -> Result<()> {
    let client = ctx.client()?;
    let package: PackageBody = client.post_empty("/v1/board/packages").await?;

    match ctx.format {
        OutputFormat::Json => print_single(&package, ctx.format),
        OutputFormat::Table => {
            print_success(&format!("Created {} ({})", package.title, package.id))
        }
    }
    Ok(())
}

/// Delete a package from the pool.
async fn remove_package(ctx: CommandContext, args: PackageArg) -> Result<()> {
    let client = ctx.client()?;
    client
        .delete(&format!("/v1/board/packages/{}", args.package))
        .await?;

    print_success(&format!("Removed {}", args.package));
    Ok(())
}

/// Move a scheduled package back into the pool.
async fn unschedule_package(ctx: CommandContext, args: PackageArg) -> Result<()> {
    let client = ctx.client()?;
    client
        .delete(&format!("/v1/board/scheduled/{}", args.package))
        .await?;

    print_success(&format!("Unscheduled {}", args.package));
    Ok(())
}

/// Drag a package onto a week or to a new pool position.
async fn move_package(ctx: CommandContext, args: MoveArgs) -> Result<()> {
    let destination = match (args.week, args.pool_index) {
        (Some(week), None) => MoveTarget {
            zone: format!("week-{week}"),
            index: 0,
        },
        (None, Some(index)) => MoveTarget {
            zone: "pool".to_string(),
            index,
        },
        _ => bail!("Specify a destination: --week <N> or --pool-index <I>"),
    };

    let source_index = match args.source_index {
        Some(index) => index,
        None => {
            let board = fetch_board(&ctx).await?;
            let Some(index) = board.pool.iter().position(|p| p.id == args.package) else {
                return Err(CliError::NotFound(format!(
                    "Package '{}' is not in the pool",
                    args.package
                ))
                .into());
            };
            index
        }
    };

    let request = MoveRequest {
        package_id: args.package,
        source_index,
        destination: Some(destination),
    };

    let client = ctx.client()?;
    let response: MoveResponse = client.post("/v1/board/moves", &request).await?;

    match ctx.format {
        OutputFormat::Json => print_single(&response, ctx.format),
        OutputFormat::Table => match &response.scheduled {
            Some(scheduled) => print_success(&format!(
                "Scheduled {} on week {}",
                scheduled.title, scheduled.week
            )),
            None => print_success(&format!("Move {}", response.outcome)),
        },
    }
    Ok(())
}

/// Dismiss the current notice.
async fn dismiss_notice(ctx: CommandContext, args: DismissArgs) -> Result<()> {
    let client = ctx.client()?;
    client
        .post_unit(&format!("/v1/board/notice/{}/dismiss", args.seq), &[])
        .await?;

    print_success("Notice dismissed");
    Ok(())
}
