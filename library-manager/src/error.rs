use thiserror::Error;

/// Message carried by the error for a negative overdue period
pub const NEGATIVE_OVERDUE_DAYS: &str = "Overdue days cannot be negative.";

/// Custom error type for library manager operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    /// A caller supplied an argument outside the accepted domain
    #[error("{0}")]
    InvalidArgument(String),
    /// The computed fee does not fit into the money representation
    #[error("Late fee for {overdue_days} overdue days is too large to represent")]
    FeeOverflow {
        /// Overdue period the fee was requested for
        overdue_days: i64,
    },
    /// A fee policy cannot be applied as configured
    #[error("Invalid fee policy: {0}")]
    InvalidFeePolicy(String),
    /// A configuration or seed document could not be parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl LibraryError {
    /// Error returned when the overdue period is negative
    #[must_use]
    pub fn negative_overdue_days() -> Self {
        Self::InvalidArgument(NEGATIVE_OVERDUE_DAYS.to_string())
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LibraryError>;
