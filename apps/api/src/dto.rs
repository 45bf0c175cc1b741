use login_throttle_application::{LoginThrottlePolicy, ThrottleStatus};
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tracked_clients: usize,
}

/// Throttle state of the calling client.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/login-status-response.ts"
)]
pub struct LoginStatusResponse {
    pub blocked: bool,
    pub failed_attempts: u32,
    pub retry_after_seconds: Option<u64>,
    pub blocked_request: Option<String>,
}

impl LoginStatusResponse {
    pub fn from_status(status: ThrottleStatus, policy: &LoginThrottlePolicy) -> Self {
        Self {
            blocked: status.blocked,
            failed_attempts: status.failed_attempts,
            retry_after_seconds: status.retry_after.map(retry_after_seconds),
            blocked_request: status.blocked.then(|| policy.block_notice()),
        }
    }
}

/// Whole seconds until a block lifts, rounded up so clients never retry early.
pub fn retry_after_seconds(remaining: std::time::Duration) -> u64 {
    let seconds = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        seconds.saturating_add(1)
    } else {
        seconds
    }
}
