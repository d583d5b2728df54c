//! API v1 routes.

pub mod board;
pub mod intro;
pub mod shipments;
pub mod tracking;

use axum::Router;

use crate::state::AppState;

/// Create API v1 routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/board", board::routes())
        .nest("/intro", intro::routes())
        .nest("/shipments", shipments::routes())
        .nest("/tracking", tracking::routes())
}
