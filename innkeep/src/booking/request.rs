//! Booking request options.

use crate::customer::CustomerId;
use crate::reservation::BookingStatus;
use crate::room::RoomId;
use crate::stay::StayRange;

/// Options for a booking request.
///
/// Carrying a [`StayRange`] means the date ordering was already validated
/// at construction; the engine never sees an unordered pair.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use innkeep::{BookingRequest, BookingStatus, CustomerId, RoomId, StayRange};
///
/// let stay = StayRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
/// )
/// .unwrap();
///
/// let request = BookingRequest::new(RoomId::new(101), CustomerId::new(8), stay)
///     .with_status(BookingStatus::Confirmed);
/// assert_eq!(request.status_or_default(), BookingStatus::Confirmed);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    room: RoomId,
    customer: CustomerId,
    stay: StayRange,
    status: Option<BookingStatus>,
}

impl BookingRequest {
    /// Creates a request for the given room, customer, and stay.
    ///
    /// The booking status defaults to [`BookingStatus::Pending`] unless
    /// overridden with [`with_status`](Self::with_status).
    #[must_use]
    pub const fn new(room: RoomId, customer: CustomerId, stay: StayRange) -> Self {
        Self {
            room,
            customer,
            stay,
            status: None,
        }
    }

    /// Sets the requested booking status.
    #[must_use]
    pub const fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the requested room.
    #[must_use]
    pub const fn room(&self) -> RoomId {
        self.room
    }

    /// Returns the booking customer.
    #[must_use]
    pub const fn customer(&self) -> CustomerId {
        self.customer
    }

    /// Returns the requested stay.
    #[must_use]
    pub const fn stay(&self) -> &StayRange {
        &self.stay
    }

    /// Returns the explicitly requested status, if any.
    #[must_use]
    pub const fn requested_status(&self) -> Option<BookingStatus> {
        self.status
    }

    /// Returns the status the reservation will be created with.
    #[must_use]
    pub fn status_or_default(&self) -> BookingStatus {
        self.status.unwrap_or(BookingStatus::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_stay() -> StayRange {
        StayRange::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_to_pending() {
        let request = BookingRequest::new(RoomId::new(1), CustomerId::new(2), sample_stay());
        assert_eq!(request.requested_status(), None);
        assert_eq!(request.status_or_default(), BookingStatus::Pending);
    }

    #[test]
    fn test_with_status() {
        let request = BookingRequest::new(RoomId::new(1), CustomerId::new(2), sample_stay())
            .with_status(BookingStatus::Confirmed);
        assert_eq!(
            request.requested_status(),
            Some(BookingStatus::Confirmed)
        );
        assert_eq!(request.status_or_default(), BookingStatus::Confirmed);
    }

    #[test]
    fn test_accessors() {
        let stay = sample_stay();
        let request = BookingRequest::new(RoomId::new(1), CustomerId::new(2), stay);
        assert_eq!(request.room(), RoomId::new(1));
        assert_eq!(request.customer(), CustomerId::new(2));
        assert_eq!(request.stay(), &stay);
    }
}
