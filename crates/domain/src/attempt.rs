//! Failed-attempt bookkeeping with sliding expiry.

use std::time::{Duration, Instant};

/// Failures observed for one client since its record was last reset.
///
/// A record expires `ban_duration` after its most recent write. Each new
/// failure pushes the expiry forward, so the window slides on write rather
/// than being anchored to the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptRecord {
    count: u32,
    last_write_at: Instant,
}

impl AttemptRecord {
    /// Creates the record for a client's first failure.
    #[must_use]
    pub fn first_failure(now: Instant) -> Self {
        Self {
            count: 1,
            last_write_at: now,
        }
    }

    /// Counts one more failure and refreshes the expiry countdown.
    ///
    /// `last_write_at` never moves backwards when writers race with slightly
    /// different clock readings.
    pub fn register_failure(&mut self, now: Instant) {
        self.count = self.count.saturating_add(1);
        self.last_write_at = self.last_write_at.max(now);
    }

    /// Number of failures in the current window. Always at least one.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Instant of the most recent failure.
    #[must_use]
    pub fn last_write_at(&self) -> Instant {
        self.last_write_at
    }

    /// Instant at which the record stops counting, or `None` when the window
    /// reaches past the range of `Instant` and the record never expires.
    #[must_use]
    pub fn expires_at(&self, ban_duration: Duration) -> Option<Instant> {
        self.last_write_at.checked_add(ban_duration)
    }

    /// Returns whether the record has expired at `now`. The expiry instant
    /// itself already counts as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant, ban_duration: Duration) -> bool {
        now.saturating_duration_since(self.last_write_at) >= ban_duration
    }

    /// Time left until expiry, zero once expired.
    #[must_use]
    pub fn remaining_at(&self, now: Instant, ban_duration: Duration) -> Duration {
        ban_duration.saturating_sub(now.saturating_duration_since(self.last_write_at))
    }
}
