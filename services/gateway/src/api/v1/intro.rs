//! Intro disclaimer endpoints.
//!
//! First-time visitors see a disclaimer they must acknowledge before the
//! app unlocks. Acknowledgements are tracked per session, keyed by the
//! `x-session-id` header; a request without one gets a fresh session.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use shipdeck_id::SessionId;

use crate::api::error::ApiError;
use crate::api::request_context::{header_string, RequestContext, SESSION_ID_HEADER};
use crate::state::AppState;

/// Create intro routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_intro))
        .route("/ack", post(acknowledge))
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct IntroResponse {
    pub session_id: SessionId,
    pub acknowledged: bool,
}

/// Whether this session has acknowledged the disclaimer.
async fn get_intro(
    ctx: RequestContext,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<IntroResponse>, ApiError> {
    let session_id = match header_string(&headers, SESSION_ID_HEADER) {
        Some(raw) => parse_session_id(&raw, &ctx)?,
        None => SessionId::new(),
    };

    let acknowledged = state.acknowledged().lock().await.contains(&session_id);
    Ok(Json(IntroResponse {
        session_id,
        acknowledged,
    }))
}

/// Record the disclaimer acknowledgement for this session.
async fn acknowledge(
    ctx: RequestContext,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let Some(raw) = header_string(&headers, SESSION_ID_HEADER) else {
        return Err(ApiError::bad_request(
            "missing_session_id",
            format!("{SESSION_ID_HEADER} header is required"),
        )
        .with_request_id(ctx.request_id));
    };

    let session_id = parse_session_id(&raw, &ctx)?;
    state.acknowledged().lock().await.insert(session_id);
    tracing::info!(%session_id, "Intro acknowledged");
    Ok(StatusCode::NO_CONTENT)
}

fn parse_session_id(raw: &str, ctx: &RequestContext) -> Result<SessionId, ApiError> {
    SessionId::parse(raw).map_err(|e| {
        ApiError::bad_request("invalid_session_id", format!("Invalid session id: {e}"))
            .with_request_id(ctx.request_id.clone())
    })
}
