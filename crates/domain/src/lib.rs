//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod attempt;
mod client_key;

pub use attempt::AttemptRecord;
pub use client_key::ClientKey;
