//! Shipment booking endpoints.

use axum::{http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;

use crate::api::error::{ApiError, FieldError};
use crate::api::request_context::RequestContext;
use crate::mock::{self, BookingConfirmation};
use crate::state::AppState;

/// Create shipment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(book_shipment))
}

// =============================================================================
// Request Types
// =============================================================================

/// Request to book a shipment.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct BookShipmentRequest {
    pub sender: Party,
    pub receiver: Party,
    pub parcel: Parcel,
}

/// One side of a shipment, sender or receiver.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct Party {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub street1: String,
    #[serde(default)]
    pub street2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Parcel dimensions and weight.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct Parcel {
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default = "default_distance_unit")]
    pub distance_unit: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default = "default_mass_unit")]
    pub mass_unit: String,
}

fn default_country() -> String {
    "US".to_string()
}

fn default_distance_unit() -> String {
    "in".to_string()
}

fn default_mass_unit() -> String {
    "lb".to_string()
}

// =============================================================================
// Handlers
// =============================================================================

/// Book a shipment.
///
/// Required fields mirror a carrier booking form: the sender additionally
/// needs an email, the receiver does not. Validation failures report every
/// missing field at once. Valid requests are answered from the mock
/// carrier layer.
async fn book_shipment(
    ctx: RequestContext,
    Json(req): Json<BookShipmentRequest>,
) -> Result<(StatusCode, Json<BookingConfirmation>), ApiError> {
    let mut missing = Vec::new();
    collect_party_errors(&req.sender, "sender", true, &mut missing);
    collect_party_errors(&req.receiver, "receiver", false, &mut missing);
    collect_parcel_errors(&req.parcel, &mut missing);

    if !missing.is_empty() {
        return Err(
            ApiError::bad_request("missing_required_fields", "Missing required fields")
                .with_details(missing)
                .with_request_id(ctx.request_id),
        );
    }

    let confirmation = mock::booking_confirmation();
    tracing::info!(shipment_id = %confirmation.shipment_id, "Shipment booked");
    Ok((StatusCode::CREATED, Json(confirmation)))
}

fn collect_party_errors(
    party: &Party,
    role: &str,
    email_required: bool,
    missing: &mut Vec<FieldError>,
) {
    let mut fields = vec![
        ("name", &party.name),
        ("street1", &party.street1),
        ("city", &party.city),
        ("state", &party.state),
        ("zip", &party.zip),
        ("phone", &party.phone),
    ];
    if email_required {
        fields.push(("email", &party.email));
    }

    for (field, value) in fields {
        if value.trim().is_empty() {
            missing.push(FieldError {
                field: format!("{role}.{field}"),
                message: "is required".to_string(),
            });
        }
    }
}

fn collect_parcel_errors(parcel: &Parcel, missing: &mut Vec<FieldError>) {
    let dims = [
        ("length", parcel.length),
        ("width", parcel.width),
        ("height", parcel.height),
        ("weight", parcel.weight),
    ];

    for (field, value) in dims {
        if value <= 0.0 {
            missing.push(FieldError {
                field: format!("parcel.{field}"),
                message: "must be greater than zero".to_string(),
            });
        }
    }
}
