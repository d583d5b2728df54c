//! Transient user-facing notices.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// How long a notice stays visible before it dismisses itself.
pub const NOTICE_TTL_SECS: i64 = 3;

/// A transient error notice shown on the board.
///
/// `seq` ties a dismissal to the notice instance it targets: a timer or user
/// action that raced with a newer notice carries a stale seq and is ignored,
/// so a fresh notice never gets cut short by an old timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub seq: u64,
    pub message: String,
    pub posted_at: DateTime<Utc>,
}

impl Notice {
    /// The instant this notice becomes eligible for auto-dismissal.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.posted_at + TimeDelta::seconds(NOTICE_TTL_SECS)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }
}
