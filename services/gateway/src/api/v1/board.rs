//! Scheduling board endpoints.
//!
//! The board is the drag-and-drop scheduler: an unscheduled pool plus a
//! rolling four-week calendar. Drop zones arrive from the frontend as
//! strings ("pool" or "week-{n}") and are decoded once at this boundary;
//! everything past it works with typed destinations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shipdeck_id::PackageId;
use shipdeck_scheduler::{
    upcoming_weeks, Destination, DragEnd, DragOutcome, Notice, Package, ScheduledPackage,
    WeekNumber, CALENDAR_WEEKS, WEEK_CAPACITY,
};

use crate::api::error::ApiError;
use crate::api::request_context::RequestContext;
use crate::state::AppState;

/// Create board routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_board))
        .route("/packages", post(create_package))
        .route("/packages/{package_id}", delete(remove_package))
        .route("/scheduled/{package_id}", delete(unschedule_package))
        .route("/moves", post(apply_move))
        .route("/notice/{seq}/dismiss", post(dismiss_notice))
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// A package in the unscheduled pool.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct PackageBody {
    pub id: PackageId,
    pub number: u32,
    pub title: String,
}

impl From<Package> for PackageBody {
    fn from(p: Package) -> Self {
        Self {
            title: p.title(),
            id: p.id,
            number: p.number,
        }
    }
}

/// A package assigned to a week.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ScheduledBody {
    pub id: PackageId,
    pub number: u32,
    pub title: String,
    pub week: WeekNumber,
}

impl From<ScheduledPackage> for ScheduledBody {
    fn from(p: ScheduledPackage) -> Self {
        Self {
            title: p.title(),
            id: p.id,
            number: p.number,
            week: p.week,
        }
    }
}

/// One calendar week in the snapshot.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct WeekBody {
    pub number: WeekNumber,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub packages: Vec<ScheduledBody>,
    pub remaining_capacity: usize,
}

/// The transient notice, if one is showing.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct NoticeBody {
    pub seq: u64,
    pub message: String,
    pub posted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<&Notice> for NoticeBody {
    fn from(n: &Notice) -> Self {
        Self {
            seq: n.seq,
            message: n.message.clone(),
            posted_at: n.posted_at,
            expires_at: n.expires_at(),
        }
    }
}

/// Full board snapshot.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct BoardResponse {
    pub pool: Vec<PackageBody>,
    pub weeks: Vec<WeekBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<ScheduledBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<NoticeBody>,
    pub week_capacity: usize,
}

/// A drop zone reference from the frontend.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct MoveTarget {
    /// "pool" or "week-{n}".
    pub zone: String,

    /// Position within the zone; only meaningful for pool reorders.
    #[serde(default)]
    pub index: usize,
}

/// A completed drag gesture.
#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub struct MoveRequest {
    pub package_id: PackageId,

    /// Position of the package in the pool when the drag started.
    #[serde(default)]
    pub source_index: usize,

    /// Absent when the drag was released outside any drop zone.
    #[serde(default)]
    pub destination: Option<MoveTarget>,
}

/// Result of a drag gesture.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct MoveResponse {
    /// "reordered", "scheduled", or "cancelled".
    pub outcome: String,

    /// Present when the outcome is "scheduled".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<ScheduledBody>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Full board snapshot: pool, calendar weeks, selection, and notice.
///
/// Expired notices are swept here as well, so a snapshot never shows a
/// notice past its TTL regardless of sweeper timing.
async fn get_board(State(state): State<AppState>) -> impl IntoResponse {
    let now = Utc::now();
    let mut board = state.board().lock().await;
    board.expire_notice(now);

    let weeks = upcoming_weeks(now.date_naive(), CALENDAR_WEEKS)
        .into_iter()
        .map(|window| {
            let packages: Vec<ScheduledBody> = board
                .week(window.number)
                .copied()
                .map(ScheduledBody::from)
                .collect();
            WeekBody {
                number: window.number,
                start: window.start,
                end: window.end,
                remaining_capacity: WEEK_CAPACITY - packages.len(),
                packages,
            }
        })
        .collect();

    Json(BoardResponse {
        pool: board.pool().iter().copied().map(PackageBody::from).collect(),
        weeks,
        selected: board.selected().copied().map(ScheduledBody::from),
        notice: board.notice().map(NoticeBody::from),
        week_capacity: WEEK_CAPACITY,
    })
}

/// Add a package to the pool. The display number is the smallest one not
/// currently in use.
async fn create_package(State(state): State<AppState>) -> impl IntoResponse {
    let mut board = state.board().lock().await;
    let package = board.create_package();
    tracing::info!(package_id = %package.id, number = package.number, "Package created");
    (StatusCode::CREATED, Json(PackageBody::from(package)))
}

/// Delete a package from the pool.
///
/// Deleting a package that is not in the pool is a no-op; the outcome is
/// the same either way, so both return 204.
async fn remove_package(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(package_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let package_id = parse_package_id(&package_id, &ctx)?;
    let mut board = state.board().lock().await;
    if board.remove_from_pool(package_id) {
        tracing::info!(%package_id, "Package deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Move a scheduled package back into the pool. No-op removals also 204.
async fn unschedule_package(
    ctx: RequestContext,
    State(state): State<AppState>,
    Path(package_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let package_id = parse_package_id(&package_id, &ctx)?;
    let mut board = state.board().lock().await;
    if board.remove_from_week(package_id) {
        tracing::info!(%package_id, "Package unscheduled");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Apply a completed drag gesture.
///
/// A full destination week is a 409; the notice the rejection posted stays
/// on the board and shows up in subsequent snapshots until it expires.
async fn apply_move(
    ctx: RequestContext,
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, ApiError> {
    let destination = match &req.destination {
        Some(target) => Some(parse_zone(&target.zone, target.index, &ctx)?),
        None => None,
    };

    let drag = DragEnd {
        package_id: req.package_id,
        source_index: req.source_index,
        destination,
    };

    let mut board = state.board().lock().await;
    match board.apply_drag(drag, Utc::now()) {
        DragOutcome::Reordered => Ok(Json(MoveResponse {
            outcome: "reordered".to_string(),
            scheduled: None,
        })),
        DragOutcome::Scheduled(package) => {
            tracing::info!(package_id = %package.id, week = package.week, "Package scheduled");
            Ok(Json(MoveResponse {
                outcome: "scheduled".to_string(),
                scheduled: Some(ScheduledBody::from(package)),
            }))
        }
        DragOutcome::Rejected { notice, .. } => {
            tracing::warn!(package_id = %req.package_id, "Week at capacity");
            Err(
                ApiError::conflict("week_capacity_exceeded", notice.message)
                    .with_request_id(ctx.request_id),
            )
        }
        DragOutcome::Cancelled => Ok(Json(MoveResponse {
            outcome: "cancelled".to_string(),
            scheduled: None,
        })),
    }
}

/// Dismiss the notice and close the detail panel.
///
/// The seq ties the dismissal to a specific notice; a stale seq leaves a
/// newer notice alone but still closes the panel.
async fn dismiss_notice(
    State(state): State<AppState>,
    Path(seq): Path<u64>,
) -> impl IntoResponse {
    let mut board = state.board().lock().await;
    board.dismiss_notice(seq);
    board.clear_selection();
    StatusCode::NO_CONTENT
}

fn parse_package_id(raw: &str, ctx: &RequestContext) -> Result<PackageId, ApiError> {
    PackageId::parse(raw).map_err(|e| {
        ApiError::bad_request("invalid_package_id", format!("Invalid package id: {e}"))
            .with_request_id(ctx.request_id.clone())
    })
}

fn parse_zone(zone: &str, index: usize, ctx: &RequestContext) -> Result<Destination, ApiError> {
    if zone == "pool" {
        return Ok(Destination::Pool { index });
    }
    if let Some(week) = zone.strip_prefix("week-") {
        if let Ok(week) = week.parse::<WeekNumber>() {
            return Ok(Destination::Week(week));
        }
    }
    Err(
        ApiError::bad_request("invalid_zone", format!("'{zone}' is not a valid drop zone"))
            .with_request_id(ctx.request_id.clone()),
    )
}
