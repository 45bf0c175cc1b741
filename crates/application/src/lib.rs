//! Application services and ports.

#![forbid(unsafe_code)]

mod login_throttle_service;

pub use login_throttle_service::{
    AttemptStore, BAN_DURATION, Clock, LoginThrottlePolicy, LoginThrottleService, MAX_ATTEMPTS,
    ThrottleStatus,
};
