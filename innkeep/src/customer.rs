//! Customer records referenced by reservations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a customer.
///
/// # Examples
///
/// ```
/// use innkeep::CustomerId;
///
/// let id = CustomerId::new(8);
/// assert_eq!(id.value(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    /// Creates a customer id from its numeric value.
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

impl From<i64> for CustomerId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer who can hold reservations.
///
/// The display name and contact email feed the booking notification; the
/// optional preferences blob is free-form JSON carried for the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    phone: Option<String>,
    preferences: Option<serde_json::Value>,
}

impl Customer {
    /// Assembles a customer from stored fields.
    pub(crate) fn from_parts(
        id: CustomerId,
        name: String,
        email: String,
        phone: Option<String>,
        preferences: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            preferences,
        }
    }

    /// Returns the customer id.
    #[must_use]
    pub const fn id(&self) -> CustomerId {
        self.id
    }

    /// Returns the customer display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the customer contact email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the customer phone number, if recorded.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the free-form preferences blob, if recorded.
    #[must_use]
    pub fn preferences(&self) -> Option<&serde_json::Value> {
        self.preferences.as_ref()
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
