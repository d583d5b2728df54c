//! Order tracking commands.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::output::{print_output, print_single, OutputFormat};

use super::CommandContext;

/// Track an order.
#[derive(Debug, Args)]
pub struct TrackCommand {
    /// Carrier tracking number (12-22 characters).
    tracking_number: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TrackingStatus {
    carrier: String,
    tracking_number: String,
    status: String,
    history: Vec<TrackingEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tabled)]
struct TrackingEvent {
    #[tabled(rename = "Status")]
    status: String,

    #[tabled(rename = "Date")]
    date: String,

    #[tabled(rename = "Details")]
    details: String,

    #[tabled(rename = "Location")]
    location: String,
}

impl TrackCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        let client = ctx.client()?;
        let status: TrackingStatus = client
            .post(
                "/v1/tracking",
                &serde_json::json!({ "tracking_number": self.tracking_number }),
            )
            .await?;

        match ctx.format {
            OutputFormat::Json => print_single(&status, ctx.format),
            OutputFormat::Table => {
                println!(
                    "{} {} via {} - {}",
                    "Tracking".bold(),
                    status.tracking_number,
                    status.carrier,
                    status.status
                );
                print_output(&status.history, ctx.format);
            }
        }
        Ok(())
    }
}
