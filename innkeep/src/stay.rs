//! Calendar-date stay ranges and overlap arithmetic.
//!
//! This module provides the half-open date interval type used by the
//! admission check. Dates are discrete calendar dates with no time-of-day
//! or timezone component, so overlap comparisons are exact.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod proptests;

/// A half-open stay interval `[check_in, check_out)`.
///
/// A `StayRange` can only be constructed with a check-out date strictly
/// after its check-in date, so holding one is proof the dates are ordered.
/// The night of the check-out date itself is not part of the stay: a stay
/// ending on a date does not conflict with a stay starting on that date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::StayRange;
///
/// let june = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
///
/// let stay = StayRange::new(june(1), june(5)).unwrap();
/// assert_eq!(stay.nights(), 4);
///
/// // Touching intervals do not overlap.
/// let next = StayRange::new(june(5), june(8)).unwrap();
/// assert!(!stay.overlaps(&next));
///
/// // Check-out must be strictly after check-in.
/// assert!(StayRange::new(june(10), june(9)).is_err());
/// assert!(StayRange::new(june(10), june(10)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStayRange")]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

// Deserialization funnels through `new` so serialized data cannot smuggle in
// an unordered range.
#[derive(Deserialize)]
struct RawStayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawStayRange> for StayRange {
    type Error = InvalidStayError;

    fn try_from(raw: RawStayRange) -> Result<Self, Self::Error> {
        Self::new(raw.check_in, raw.check_out)
    }
}

impl StayRange {
    /// Creates a new stay range.
    ///
    /// # Errors
    ///
    /// Returns an error if `check_out` is not strictly after `check_in`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::StayRange;
    ///
    /// let check_in = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let check_out = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
    /// assert!(StayRange::new(check_in, check_out).is_ok());
    /// assert!(StayRange::new(check_out, check_in).is_err());
    /// ```
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidStayError> {
        if check_out <= check_in {
            return Err(InvalidStayError {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Returns the check-in date.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the number of nights in the stay.
    ///
    /// Always at least 1 for a constructible range.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::StayRange;
    ///
    /// let stay = StayRange::new(
    ///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 6, 2).unwrap(),
    /// )
    /// .unwrap();
    /// assert_eq!(stay.nights(), 1);
    /// ```
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Returns `true` if this stay overlaps another on at least one night.
    ///
    /// Uses the standard half-open interval test: `[a1, b1)` and `[a2, b2)`
    /// overlap iff `a1 < b2 && a2 < b1`. A stay whose check-out equals the
    /// other's check-in shares no night, so it does not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::StayRange;
    ///
    /// let june = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
    /// let stay = StayRange::new(june(1), june(5)).unwrap();
    ///
    /// assert!(stay.overlaps(&StayRange::new(june(4), june(6)).unwrap()));
    /// assert!(!stay.overlaps(&StayRange::new(june(5), june(8)).unwrap()));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Returns `true` if the given date falls on a night of this stay.
    ///
    /// The check-out date itself is excluded.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use innkeep::StayRange;
    ///
    /// let june = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
    /// let stay = StayRange::new(june(1), june(5)).unwrap();
    ///
    /// assert!(stay.contains(june(1)));
    /// assert!(stay.contains(june(4)));
    /// assert!(!stay.contains(june(5)));
    /// ```
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }
}

impl fmt::Display for StayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.check_in, self.check_out)
    }
}

/// Error type for stay ranges whose dates are not strictly ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStayError {
    /// The rejected check-in date.
    pub check_in: NaiveDate,
    /// The rejected check-out date.
    pub check_out: NaiveDate,
}

impl fmt::Display for InvalidStayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "check-out {} is not after check-in {}",
            self.check_out, self.check_in
        )
    }
}

impl std::error::Error for InvalidStayError {}
