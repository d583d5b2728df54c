//! Canned carrier responses.
//!
//! The demo has no live carrier integration. These builders fabricate the
//! responses a Shippo-style API would return, with stable identifiers so
//! the frontend renders something believable.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use shipdeck_id::ShipmentId;

pub const CARRIER: &str = "Shippo";

const MOCK_SHIPMENT_OBJECT_ID: &str = "ship_987654321";
const MOCK_TRACKING_NUMBER: &str = "SHIP987654321";
const MOCK_LABEL_URL: &str = "https://deliver.goshippo.com/mock-label.pdf";

/// Tracking status for an order.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct TrackingStatus {
    pub carrier: String,
    pub tracking_number: String,
    pub status: String,
    pub history: Vec<TrackingEvent>,
}

/// One scan event in a package's journey.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct TrackingEvent {
    pub status: String,
    pub date: DateTime<Utc>,
    pub details: String,
    pub location: String,
}

/// Fabricates an in-transit tracking history for `tracking_number`.
pub fn tracking_status(tracking_number: &str, now: DateTime<Utc>) -> TrackingStatus {
    TrackingStatus {
        carrier: CARRIER.to_string(),
        tracking_number: tracking_number.to_string(),
        status: "TRANSIT".to_string(),
        history: vec![
            TrackingEvent {
                status: "TRANSIT".to_string(),
                date: now - TimeDelta::hours(2),
                details: "Package in transit to destination".to_string(),
                location: "San Francisco, CA, 94117, US".to_string(),
            },
            TrackingEvent {
                status: "PRE_TRANSIT".to_string(),
                date: now - TimeDelta::days(1),
                details: "Package picked up".to_string(),
                location: "New York, NY, 10004, US".to_string(),
            },
        ],
    }
}

/// Confirmation of a booked shipment.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct BookingConfirmation {
    pub shipment_id: ShipmentId,
    pub shipment_object_id: String,
    pub transaction_status: String,
    pub tracking_number: String,
    pub label_url: String,
}

/// Fabricates a successful booking confirmation.
pub fn booking_confirmation() -> BookingConfirmation {
    BookingConfirmation {
        shipment_id: ShipmentId::new(),
        shipment_object_id: MOCK_SHIPMENT_OBJECT_ID.to_string(),
        transaction_status: "SUCCESS".to_string(),
        tracking_number: MOCK_TRACKING_NUMBER.to_string(),
        label_url: MOCK_LABEL_URL.to_string(),
    }
}
