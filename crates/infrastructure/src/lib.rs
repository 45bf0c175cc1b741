//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod clock;
mod in_memory_attempt_store;

pub use clock::{ManualClock, SystemClock};
pub use in_memory_attempt_store::InMemoryAttemptStore;
