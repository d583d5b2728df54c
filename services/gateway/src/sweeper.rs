//! Background expiry of transient notices.
//!
//! Capacity notices auto-dismiss a few seconds after they are posted. The
//! board handles expiry lazily on reads; this worker sweeps in between so a
//! notice does not outlive its TTL just because nobody asked for a snapshot.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::debug;

use crate::state::AppState;

pub struct NoticeSweeper {
    state: AppState,
    interval: Duration,
}

impl NoticeSweeper {
    pub fn new(state: AppState, interval: Duration) -> Self {
        Self { state, interval }
    }

    /// Runs until the shutdown channel flips to true.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let mut board = self.state.board().lock().await;
                    if board.expire_notice(Utc::now()) {
                        debug!("Expired notice past its TTL");
                    }
                }
                result = shutdown_rx.changed() => {
                    if result.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }
        debug!("Notice sweeper stopped");
    }
}
