//! Error types for the innkeep library.
//!
//! This module provides the error hierarchy for all booking operations,
//! using `thiserror` for ergonomic error handling.

use chrono::NaiveDate;
use thiserror::Error;

use crate::customer::CustomerId;
use crate::reservation::BookingStatus;
use crate::room::RoomId;

/// Result type alias for operations that may fail with an innkeep error.
///
/// # Examples
///
/// ```
/// use innkeep::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(101)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the innkeep library.
///
/// This enum encompasses all error conditions that can occur during
/// reservation admission, persistence, and administration.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested stay has a check-out date on or before its check-in date.
    #[error("invalid date range: check-out {check_out} is not after check-in {check_in}")]
    InvalidDateRange {
        /// The requested check-in date.
        check_in: NaiveDate,
        /// The requested check-out date.
        check_out: NaiveDate,
    },

    /// The referenced room does not exist.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The referenced customer does not exist.
    #[error("customer not found: {0}")]
    CustomerNotFound(CustomerId),

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The room cannot be booked for the requested dates.
    #[error("room {room} unavailable for {check_in}..{check_out}")]
    RoomUnavailable {
        /// The room that was requested.
        room: RoomId,
        /// The requested check-in date.
        check_in: NaiveDate,
        /// The requested check-out date.
        check_out: NaiveDate,
    },

    /// An attempted booking-status transition is not allowed.
    #[error("cannot change booking status from {from} to {to}")]
    StatusTransition {
        /// The current status.
        from: BookingStatus,
        /// The requested status.
        to: BookingStatus,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

// Additional conversions for better ergonomics

impl From<crate::stay::InvalidStayError> for Error {
    fn from(err: crate::stay::InvalidStayError) -> Self {
        Self::InvalidDateRange {
            check_in: err.check_in,
            check_out: err.check_out,
        }
    }
}

impl From<crate::reservation::InvalidCodeError> for Error {
    fn from(err: crate::reservation::InvalidCodeError) -> Self {
        Self::Validation {
            field: "code".into(),
            message: err.reason,
        }
    }
}

impl From<crate::reservation::InvalidStatusError> for Error {
    fn from(err: crate::reservation::InvalidStatusError) -> Self {
        Self::Validation {
            field: "booking_status".into(),
            message: format!("unknown booking status: {}", err.value),
        }
    }
}

impl Error {
    /// Check if the error indicates a missing room, customer, or record.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::{Error, RoomId};
    ///
    /// let err = Error::RoomNotFound(RoomId::new(7));
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RoomNotFound(_) | Self::CustomerNotFound(_) | Self::NotFound { .. }
        )
    }

    /// Check if the error is a booking conflict for the requested dates.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::{Error, RoomId};
    ///
    /// let err = Error::RoomUnavailable {
    ///     room: RoomId::new(101),
    ///     check_in: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
    ///     check_out: NaiveDate::from_ymd_opt(2024, 6, 6).unwrap(),
    /// };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::RoomUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invalid_date_range_error() {
        let err = Error::InvalidDateRange {
            check_in: date(2024, 6, 10),
            check_out: date(2024, 6, 9),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid date range"));
        assert!(display.contains("2024-06-10"));
        assert!(display.contains("2024-06-09"));
    }

    #[test]
    fn test_room_not_found_error() {
        let err = Error::RoomNotFound(RoomId::new(42));
        let display = format!("{err}");
        assert!(display.contains("room not found"));
        assert!(display.contains("42"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_customer_not_found_error() {
        let err = Error::CustomerNotFound(CustomerId::new(9));
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_room_unavailable_error() {
        let err = Error::RoomUnavailable {
            room: RoomId::new(101),
            check_in: date(2024, 6, 4),
            check_out: date(2024, 6, 6),
        };
        let display = format!("{err}");
        assert!(display.contains("unavailable"));
        assert!(display.contains("101"));
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_status_transition_error() {
        let err = Error::StatusTransition {
            from: BookingStatus::Cancelled,
            to: BookingStatus::Confirmed,
        };
        let display = format!("{err}");
        assert!(display.contains("Cancelled"));
        assert!(display.contains("Confirmed"));
    }

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "email".to_string(),
            message: "must contain '@'".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("email"));
    }

    #[test]
    fn test_lock_timeout_error() {
        let err = Error::LockTimeout { seconds: 5 };
        let display = format!("{err}");
        assert!(display.contains("lock timeout"));
        assert!(display.contains('5'));
    }

    #[test]
    fn test_unsupported_schema_version_error() {
        let err = Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 3,
        };
        let display = format!("{err}");
        assert!(display.contains("expected 1"));
        assert!(display.contains("found 3"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }

    #[test]
    fn test_invalid_stay_conversion() {
        let stay_err = crate::stay::InvalidStayError {
            check_in: date(2024, 6, 10),
            check_out: date(2024, 6, 9),
        };
        let err: Error = stay_err.into();
        assert!(matches!(err, Error::InvalidDateRange { .. }));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u32> {
            Err(Error::NotFound {
                resource: "hotel 3".into(),
            })
        }

        assert!(returns_result().is_err());
    }
}
