//! Order tracking endpoints.

use axum::{routing::post, Json, Router};
use chrono::Utc;
use serde::Deserialize;

use crate::api::error::{ApiError, FieldError};
use crate::api::request_context::RequestContext;
use crate::mock::{self, TrackingStatus};
use crate::state::AppState;

/// Tracking numbers must be 12-22 characters, matching what real carriers
/// issue.
const MIN_TRACKING_LEN: usize = 12;
const MAX_TRACKING_LEN: usize = 22;

/// Create tracking routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(track_order))
}

#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct TrackRequest {
    pub tracking_number: String,
}

/// Look up the status of a shipment by tracking number.
///
/// The number is validated, then answered from the mock carrier layer.
async fn track_order(
    ctx: RequestContext,
    Json(req): Json<TrackRequest>,
) -> Result<Json<TrackingStatus>, ApiError> {
    let tracking_number = req.tracking_number.trim();
    let len = tracking_number.chars().count();
    if !(MIN_TRACKING_LEN..=MAX_TRACKING_LEN).contains(&len) {
        return Err(ApiError::bad_request(
            "invalid_tracking_number",
            format!("Tracking number must be {MIN_TRACKING_LEN}-{MAX_TRACKING_LEN} characters"),
        )
        .with_details(vec![FieldError {
            field: "tracking_number".to_string(),
            message: format!("got {len} characters"),
        }])
        .with_request_id(ctx.request_id));
    }

    tracing::info!(tracking_number, "Tracking lookup");
    Ok(Json(mock::tracking_status(tracking_number, Utc::now())))
}
