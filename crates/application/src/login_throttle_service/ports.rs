use std::time::{Duration, Instant};

use login_throttle_domain::{AttemptRecord, ClientKey};

/// Source of time for the throttle.
pub trait Clock: Send + Sync {
    /// Returns the current monotonic instant.
    fn now(&self) -> Instant;
}

/// Keyed store of failed attempts with per-entry sliding expiry.
///
/// Implementations must apply every operation atomically per key: a reader
/// never observes a count and timestamp from different writes, and concurrent
/// writers to one key never lose an increment. A record is expired once
/// `now >= last_write_at + ban_duration` and must then behave exactly like a
/// key that never failed.
pub trait AttemptStore: Send + Sync {
    /// Counts one failure for `key` and returns the updated record.
    ///
    /// Creates the record on first failure and restarts it at one when the
    /// previous record has expired.
    fn record_failure(
        &self,
        key: &ClientKey,
        now: Instant,
        ban_duration: Duration,
    ) -> AttemptRecord;

    /// Returns a snapshot of the record for `key` if it has not expired.
    ///
    /// May remove an expired record as a side effect.
    fn find_active(
        &self,
        key: &ClientKey,
        now: Instant,
        ban_duration: Duration,
    ) -> Option<AttemptRecord>;

    /// Removes every expired record and returns how many were removed.
    fn purge_expired(&self, now: Instant, ban_duration: Duration) -> usize;

    /// Number of records physically held, expired or not.
    fn tracked_clients(&self) -> usize;
}
