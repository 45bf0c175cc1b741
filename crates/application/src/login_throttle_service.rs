//! Login throttle ports and application service.
//!
//! Tracks failed authentication attempts per client key and reports a client
//! as blocked once the failure count reaches the policy threshold inside a
//! sliding window. State is in-process only and lost on restart.

mod config;
mod ports;
mod service;


pub use config::{BAN_DURATION, LoginThrottlePolicy, MAX_ATTEMPTS};
pub use ports::{AttemptStore, Clock};
pub use service::{LoginThrottleService, ThrottleStatus};
