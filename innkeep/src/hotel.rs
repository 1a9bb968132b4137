//! Hotel records referenced by rooms and notifications.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a hotel.
///
/// # Examples
///
/// ```
/// use innkeep::HotelId;
///
/// let id = HotelId::new(3);
/// assert_eq!(id.value(), 3);
/// assert_eq!(format!("{id}"), "3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HotelId(i64);

impl HotelId {
    /// Creates a hotel id from its numeric value.
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

impl From<i64> for HotelId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for HotelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hotel with its contact details.
///
/// The hotel email is the sender address used in booking notifications,
/// and the hotel name signs the notification body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    id: HotelId,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
}

impl Hotel {
    /// Assembles a hotel from stored fields.
    pub(crate) fn from_parts(
        id: HotelId,
        name: String,
        email: String,
        phone: Option<String>,
        address: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            address,
        }
    }

    /// Returns the hotel id.
    #[must_use]
    pub const fn id(&self) -> HotelId {
        self.id
    }

    /// Returns the hotel name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the hotel contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the hotel phone number, if recorded.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the hotel street address, if recorded.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotel_id_round_trip() {
        let id = HotelId::from(12);
        assert_eq!(id, HotelId::new(12));
        assert_eq!(id.value(), 12);
    }

    #[test]
    fn test_hotel_accessors() {
        let hotel = Hotel::from_parts(
            HotelId::new(1),
            "Seaside Inn".into(),
            "desk@seaside.example".into(),
            Some("+44 1632 960000".into()),
            None,
        );
        assert_eq!(hotel.id(), HotelId::new(1));
        assert_eq!(hotel.name(), "Seaside Inn");
        assert_eq!(hotel.email(), "desk@seaside.example");
        assert!(hotel.phone().is_some());
        assert!(hotel.address().is_none());
        assert_eq!(format!("{hotel}"), "Seaside Inn");
    }
}
