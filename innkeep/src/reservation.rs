//! Reservation records, booking statuses, and reservation codes.
//!
//! This module provides the persisted reservation type together with the
//! closed booking-status state machine and the externally-facing
//! reservation code.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::customer::CustomerId;
use crate::room::RoomId;
use crate::stay::StayRange;

/// A unique identifier for a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Creates a reservation id from its numeric value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ReservationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The lifecycle status of a booking.
///
/// The status machine is closed:
///
/// ```text
/// Pending   -> Confirmed | Cancelled
/// Confirmed -> Cancelled
/// Cancelled -> (terminal)
/// ```
///
/// Only `Confirmed` reservations participate in the overlap constraint; a
/// room may accumulate any number of pending or cancelled holds.
///
/// # Examples
///
/// ```
/// use innkeep::BookingStatus;
///
/// assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
/// assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Pending));
/// assert_eq!("Confirmed".parse::<BookingStatus>().unwrap(), BookingStatus::Confirmed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Held but not yet confirmed; does not block other bookings.
    Pending,
    /// Admitted; holds the room for the stay's nights.
    Confirmed,
    /// Terminal; releases any claim on the room.
    Cancelled,
}

impl BookingStatus {
    /// Returns the canonical string form, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns `true` if the status machine allows moving to `next`.
    ///
    /// A no-op transition (same status) is not a transition and returns
    /// `false`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed | Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    /// Returns `true` if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = InvalidStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidStatusError {
                value: s.to_string(),
            }),
        }
    }
}

/// Error type for unrecognized booking-status strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatusError {
    /// The string that failed to parse.
    pub value: String,
}

impl fmt::Display for InvalidStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown booking status: {}", self.value)
    }
}

impl std::error::Error for InvalidStatusError {}

/// The externally-facing reservation code.
///
/// A code is 10 bytes of cryptographically strong randomness, hex-encoded
/// to 20 lowercase characters. It is assigned exactly once at creation and
/// never regenerated on subsequent saves.
///
/// # Examples
///
/// ```
/// use innkeep::ReservationCode;
///
/// let code = ReservationCode::generate();
/// assert_eq!(code.as_str().len(), 20);
/// assert!(code.as_str().chars().all(|c| c.is_ascii_hexdigit()));
///
/// // Parsing validates length and alphabet.
/// assert!("0123456789abcdef0123".parse::<ReservationCode>().is_ok());
/// assert!("too-short".parse::<ReservationCode>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationCode(String);

impl ReservationCode {
    /// Number of random bytes in a code.
    const RANDOM_BYTES: usize = 10;

    /// Length of the hex-encoded code in characters.
    pub const LEN: usize = 2 * Self::RANDOM_BYTES;

    /// Generates a fresh random code from the operating system RNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; Self::RANDOM_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ReservationCode {
    type Err = InvalidCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::LEN {
            return Err(InvalidCodeError {
                reason: format!("code must be {} characters, got {}", Self::LEN, s.len()),
            });
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidCodeError {
                reason: "code must be hexadecimal".into(),
            });
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

/// Error type for malformed reservation codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCodeError {
    /// A description of what is wrong with the code.
    pub reason: String,
}

impl fmt::Display for InvalidCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid reservation code: {}", self.reason)
    }
}

impl std::error::Error for InvalidCodeError {}

/// A persisted reservation of one room for one customer over a stay.
///
/// Reservations are created by [`BookingEngine::book`] and only ever
/// materialize from the store, so an instance always carries its assigned
/// id and code.
///
/// [`BookingEngine::book`]: crate::booking::BookingEngine::book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    code: ReservationCode,
    customer: CustomerId,
    room: RoomId,
    stay: StayRange,
    status: BookingStatus,
    created_at: SystemTime,
}

impl Reservation {
    /// Assembles a reservation from stored fields.
    pub(crate) fn from_parts(
        id: ReservationId,
        code: ReservationCode,
        customer: CustomerId,
        room: RoomId,
        stay: StayRange,
        status: BookingStatus,
        created_at: SystemTime,
    ) -> Self {
        Self {
            id,
            code,
            customer,
            room,
            stay,
            status,
            created_at,
        }
    }

    /// Returns the reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the reservation code.
    #[must_use]
    pub const fn code(&self) -> &ReservationCode {
        &self.code
    }

    /// Returns the id of the booking customer.
    #[must_use]
    pub const fn customer(&self) -> CustomerId {
        self.customer
    }

    /// Returns the id of the booked room.
    #[must_use]
    pub const fn room(&self) -> RoomId {
        self.room
    }

    /// Returns the stay interval.
    #[must_use]
    pub const fn stay(&self) -> &StayRange {
        &self.stay
    }

    /// Returns the booking status.
    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn june(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_status_as_str_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
        ] {
            let parsed: BookingStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(
            "confirmed".parse::<BookingStatus>().unwrap(),
            BookingStatus::Confirmed
        );
        assert_eq!(
            "PENDING".parse::<BookingStatus>().unwrap(),
            BookingStatus::Pending
        );
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        let err = "tentative".parse::<BookingStatus>().unwrap_err();
        assert!(format!("{err}").contains("tentative"));
    }

    #[test]
    fn test_status_transitions() {
        use BookingStatus::{Cancelled, Confirmed, Pending};

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));

        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Confirmed));

        // Same-status is not a transition.
        assert!(!Pending.can_transition_to(Pending));
        assert!(!Confirmed.can_transition_to(Confirmed));
    }

    #[test]
    fn test_status_terminal() {
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
    }

    #[test]
    fn test_code_format() {
        let code = ReservationCode::generate();
        assert_eq!(code.as_str().len(), ReservationCode::LEN);
        assert!(code
            .as_str()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: HashSet<_> = (0..1000)
            .map(|_| ReservationCode::generate().as_str().to_string())
            .collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_code_parse_valid() {
        let code: ReservationCode = "0123456789ABCDEF0123".parse().unwrap();
        // Parsing normalizes to lowercase.
        assert_eq!(code.as_str(), "0123456789abcdef0123");
    }

    #[test]
    fn test_code_parse_wrong_length() {
        let err = "abc123".parse::<ReservationCode>().unwrap_err();
        assert!(err.reason.contains("20 characters"));
    }

    #[test]
    fn test_code_parse_non_hex() {
        let err = "0123456789abcdef012z".parse::<ReservationCode>().unwrap_err();
        assert!(err.reason.contains("hexadecimal"));
    }

    #[test]
    fn test_reservation_accessors() {
        let stay = StayRange::new(june(1), june(5)).unwrap();
        let code = ReservationCode::generate();
        let now = SystemTime::now();
        let reservation = Reservation::from_parts(
            ReservationId::new(1),
            code.clone(),
            CustomerId::new(8),
            RoomId::new(101),
            stay,
            BookingStatus::Confirmed,
            now,
        );

        assert_eq!(reservation.id(), ReservationId::new(1));
        assert_eq!(reservation.code(), &code);
        assert_eq!(reservation.customer(), CustomerId::new(8));
        assert_eq!(reservation.room(), RoomId::new(101));
        assert_eq!(reservation.stay(), &stay);
        assert_eq!(reservation.status(), BookingStatus::Confirmed);
        assert_eq!(reservation.created_at(), now);
    }

    #[test]
    fn test_reservation_serde() {
        let reservation = Reservation::from_parts(
            ReservationId::new(1),
            ReservationCode::generate(),
            CustomerId::new(8),
            RoomId::new(101),
            StayRange::new(june(1), june(5)).unwrap(),
            BookingStatus::Pending,
            SystemTime::UNIX_EPOCH,
        );
        let json = serde_json::to_string(&reservation).unwrap();
        let back: Reservation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reservation);
    }
}
