use std::sync::Arc;
use std::time::Duration;

use login_throttle_domain::ClientKey;
use tracing::{debug, warn};

use super::config::LoginThrottlePolicy;
use super::ports::{AttemptStore, Clock};

/// Throttle state for one client at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleStatus {
    /// Failures counted in the current window.
    pub failed_attempts: u32,
    /// Whether login attempts must be rejected.
    pub blocked: bool,
    /// Time until the block lifts if no further failures arrive.
    pub retry_after: Option<Duration>,
}

/// Application service for login attempt throttling.
///
/// Cloning is cheap and every clone shares the same attempt store.
#[derive(Clone)]
pub struct LoginThrottleService {
    store: Arc<dyn AttemptStore>,
    clock: Arc<dyn Clock>,
    policy: LoginThrottlePolicy,
}

impl LoginThrottleService {
    /// Creates a new login throttle service.
    #[must_use]
    pub fn new(
        store: Arc<dyn AttemptStore>,
        clock: Arc<dyn Clock>,
        policy: LoginThrottlePolicy,
    ) -> Self {
        Self {
            store,
            clock,
            policy,
        }
    }

    /// Returns the policy this service enforces.
    #[must_use]
    pub fn policy(&self) -> &LoginThrottlePolicy {
        &self.policy
    }

    /// Records a failed authentication for `client_key`.
    ///
    /// Must only be called after a verification failure, never after success.
    pub fn record_failure(&self, client_key: &ClientKey) {
        let record = self.store.record_failure(
            client_key,
            self.clock.now(),
            self.policy.ban_duration(),
        );

        if record.count() == self.policy.max_attempts() {
            warn!(
                client_key = %client_key,
                failures = record.count(),
                ban_seconds = self.policy.ban_duration().as_secs(),
                "client blocked after repeated login failures"
            );
        } else {
            debug!(
                client_key = %client_key,
                failures = record.count(),
                "recorded failed login attempt"
            );
        }
    }

    /// Returns whether `client_key` has reached the failure threshold within
    /// the current window.
    #[must_use]
    pub fn is_blocked(&self, client_key: &ClientKey) -> bool {
        self.store
            .find_active(client_key, self.clock.now(), self.policy.ban_duration())
            .is_some_and(|record| self.policy.blocks(record.count()))
    }

    /// Returns the failure count, block decision and remaining block window
    /// for `client_key`, all taken from one consistent snapshot.
    #[must_use]
    pub fn status(&self, client_key: &ClientKey) -> ThrottleStatus {
        let now = self.clock.now();
        let ban_duration = self.policy.ban_duration();

        let Some(record) = self.store.find_active(client_key, now, ban_duration) else {
            return ThrottleStatus {
                failed_attempts: 0,
                blocked: false,
                retry_after: None,
            };
        };

        let blocked = self.policy.blocks(record.count());
        ThrottleStatus {
            failed_attempts: record.count(),
            blocked,
            retry_after: blocked.then(|| record.remaining_at(now, ban_duration)),
        }
    }

    /// Removes expired records. Intended for periodic cleanup; expiry is
    /// already enforced on every read.
    pub fn purge_expired(&self) -> usize {
        let purged = self
            .store
            .purge_expired(self.clock.now(), self.policy.ban_duration());
        if purged > 0 {
            debug!(purged, "purged expired login attempt records");
        }
        purged
    }

    /// Number of client records currently held in memory.
    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.store.tracked_clients()
    }
}
