//! Shipment booking commands.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Book a shipment from a JSON form.
#[derive(Debug, Args)]
pub struct BookCommand {
    /// Path to a booking form (JSON). See --sample for the shape.
    #[arg(conflicts_with = "sample")]
    file: Option<PathBuf>,

    /// Print a sample booking form and exit.
    #[arg(long)]
    sample: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct BookingConfirmation {
    shipment_id: String,
    shipment_object_id: String,
    transaction_status: String,
    tracking_number: String,
    label_url: String,
}

impl BookCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        if self.sample {
            println!("{}", sample_form());
            return Ok(());
        }

        let Some(path) = self.file else {
            bail!("Provide a booking form file, or --sample to see the shape");
        };

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let form: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not valid JSON", path.display()))?;

        let client = ctx.client()?;
        let confirmation: BookingConfirmation = client.post("/v1/shipments", &form).await?;

        match ctx.format {
            OutputFormat::Json => print_single(&confirmation, ctx.format),
            OutputFormat::Table => {
                print_success(&format!(
                    "Shipment booked: {} (tracking {})",
                    confirmation.shipment_id, confirmation.tracking_number
                ));
                println!("Label: {}", confirmation.label_url);
            }
        }
        Ok(())
    }
}

fn sample_form() -> String {
    let sample = serde_json::json!({
        "sender": {
            "name": "Ada Lovelace",
            "street1": "1 Analytical Way",
            "street2": "",
            "city": "London",
            "state": "LDN",
            "zip": "EC1A",
            "country": "GB",
            "phone": "+44 20 7946 0000",
            "email": "ada@example.com"
        },
        "receiver": {
            "name": "Grace Hopper",
            "street1": "2 Compiler Court",
            "city": "Arlington",
            "state": "VA",
            "zip": "22201",
            "country": "US",
            "phone": "+1 555 0100"
        },
        "parcel": {
            "length": 10,
            "width": 6,
            "height": 4,
            "distance_unit": "in",
            "weight": 2,
            "mass_unit": "lb"
        }
    });
    serde_json::to_string_pretty(&sample).unwrap_or_else(|_| "{}".to_string())
}
