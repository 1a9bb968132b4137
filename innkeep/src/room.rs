//! Room records and the advisory availability flag.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hotel::{Hotel, HotelId};

/// A unique identifier for a room.
///
/// # Examples
///
/// ```
/// use innkeep::RoomId;
///
/// let id = RoomId::new(101);
/// assert_eq!(id.value(), 101);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(i64);

impl RoomId {
    /// Creates a room id from its numeric value.
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

impl From<i64> for RoomId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A bookable room belonging to a hotel.
///
/// The `is_available` flag is advisory: it is a denormalized hint shown in
/// listings, not the source of truth. Availability for a concrete date
/// range is always recomputed from the confirmed reservations for the
/// room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    hotel: HotelId,
    number: u32,
    complement: Option<String>,
    is_available: bool,
}

impl Room {
    /// Assembles a room from stored fields.
    pub(crate) fn from_parts(
        id: RoomId,
        hotel: HotelId,
        number: u32,
        complement: Option<String>,
        is_available: bool,
    ) -> Self {
        Self {
            id,
            hotel,
            number,
            complement,
            is_available,
        }
    }

    /// Returns the room id.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Returns the id of the hotel this room belongs to.
    #[must_use]
    pub const fn hotel(&self) -> HotelId {
        self.hotel
    }

    /// Returns the room number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Returns the complement (wing, floor, suite name), if any.
    #[must_use]
    pub fn complement(&self) -> Option<&str> {
        self.complement.as_deref()
    }

    /// Returns the advisory availability flag.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.is_available
    }

    /// Returns a human-readable alias for the room within its hotel,
    /// e.g. `"Seaside Inn - 101 ocean view"`.
    #[must_use]
    pub fn alias(&self, hotel: &Hotel) -> String {
        match &self.complement {
            Some(complement) => format!("{} - {} {}", hotel.name(), self.number, complement),
            None => format!("{} - {}", hotel.name(), self.number),
        }
    }
}
