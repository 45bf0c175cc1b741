//! Client key identifying the source of a login attempt.

use std::fmt::{Display, Formatter};

use login_throttle_core::{AppError, AppResult, NonEmptyString};

/// Opaque identifier for a login-attempt source, such as a derived IP address.
///
/// The value is never parsed or normalized. Two keys are the same client only
/// if their strings are byte-for-byte equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(NonEmptyString);

impl ClientKey {
    /// Creates a client key, rejecting empty or whitespace-only values so that
    /// unrelated clients are never aggregated under a blank key.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        NonEmptyString::new(value)
            .map(Self)
            .map_err(|_| AppError::Validation("client key must not be empty".to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ClientKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}
