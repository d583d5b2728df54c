//! Application state shared across request handlers.

use std::collections::HashSet;
use std::sync::Arc;

use shipdeck_id::SessionId;
use shipdeck_scheduler::ScheduleBoard;
use tokio::sync::Mutex;

/// Shared application state.
///
/// This is passed to all request handlers via Axum's state extractor.
/// The board is a single in-memory instance; this service is a demo and
/// does not persist anything across restarts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    board: Mutex<ScheduleBoard>,
    /// Sessions that have acknowledged the intro disclaimer.
    acknowledged: Mutex<HashSet<SessionId>>,
}

impl AppState {
    /// Create a new application state with a pre-seeded board.
    pub fn new(seed_packages: usize) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                board: Mutex::new(ScheduleBoard::seeded(seed_packages)),
                acknowledged: Mutex::new(HashSet::new()),
            }),
        }
    }

    pub fn board(&self) -> &Mutex<ScheduleBoard> {
        &self.inner.board
    }

    pub fn acknowledged(&self) -> &Mutex<HashSet<SessionId>> {
        &self.inner.acknowledged
    }
}
