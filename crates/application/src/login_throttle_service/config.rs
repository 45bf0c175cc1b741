use std::time::Duration;

use login_throttle_core::{AppError, AppResult};

/// Failures below this count never block a client.
pub const MAX_ATTEMPTS: u32 = 3;

/// Eviction window, and effectively the minimum block duration once triggered.
pub const BAN_DURATION: Duration = Duration::from_secs(5 * 60);

/// Threshold and window for the login throttle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginThrottlePolicy {
    max_attempts: u32,
    ban_duration: Duration,
}

impl LoginThrottlePolicy {
    /// Creates a validated policy.
    pub fn new(max_attempts: u32, ban_duration: Duration) -> AppResult<Self> {
        if max_attempts == 0 {
            return Err(AppError::Validation(
                "max login attempts must be at least 1".to_owned(),
            ));
        }

        if ban_duration.is_zero() {
            return Err(AppError::Validation(
                "login ban duration must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            max_attempts,
            ban_duration,
        })
    }

    /// Number of failures at which a client becomes blocked.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Sliding window after the last failure during which failures count.
    #[must_use]
    pub fn ban_duration(&self) -> Duration {
        self.ban_duration
    }

    /// Returns whether `failures` within the window block the client.
    #[must_use]
    pub fn blocks(&self, failures: u32) -> bool {
        failures >= self.max_attempts
    }

    /// Explanation attached to rejections of blocked clients.
    #[must_use]
    pub fn block_notice(&self) -> String {
        let seconds = self.ban_duration.as_secs();
        let window = if seconds > 0 && seconds % 60 == 0 {
            plural(seconds / 60, "minute")
        } else {
            plural(seconds.max(1), "second")
        };

        format!(
            "Blocked for {window} after {} unsuccessful attempts",
            self.max_attempts
        )
    }
}

impl Default for LoginThrottlePolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            ban_duration: BAN_DURATION,
        }
    }
}

fn plural(amount: u64, unit: &str) -> String {
    if amount == 1 {
        format!("{amount} {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}
