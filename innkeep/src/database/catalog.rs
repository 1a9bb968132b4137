//! CRUD operations for hotels, rooms, and customers.
//!
//! These records are the collaborators the booking core consumes: rooms
//! for existence and the advisory flag, customers and hotels for
//! notification content.

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::customer::{Customer, CustomerId};
use crate::error::{Error, Result};
use crate::hotel::{Hotel, HotelId};
use crate::room::{Room, RoomId};

use super::connection::Database;

const SELECT_HOTEL: &str = "SELECT id, name, email, phone, address FROM hotels WHERE id = ?";
const SELECT_ROOM: &str =
    "SELECT id, hotel_id, number, complement, is_available FROM rooms WHERE id = ?";
const SELECT_CUSTOMER: &str =
    "SELECT id, name, email, phone, preferences FROM customers WHERE id = ?";

fn row_to_hotel(row: &rusqlite::Row<'_>) -> rusqlite::Result<Hotel> {
    Ok(Hotel::from_parts(
        HotelId::new(row.get(0)?),
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room::from_parts(
        RoomId::new(row.get(0)?),
        HotelId::new(row.get(1)?),
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn row_to_customer(row: &rusqlite::Row<'_>) -> rusqlite::Result<Customer> {
    let preferences: Option<String> = row.get(4)?;
    let preferences = preferences
        .map(|raw| {
            serde_json::from_str(&raw)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
        })
        .transpose()?;

    Ok(Customer::from_parts(
        CustomerId::new(row.get(0)?),
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        preferences,
    ))
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation {
            field: field.into(),
            message: "must be non-empty".into(),
        });
    }
    Ok(())
}

fn require_email(field: &str, value: &str) -> Result<()> {
    require_non_empty(field, value)?;
    if !value.contains('@') {
        return Err(Error::Validation {
            field: field.into(),
            message: format!("'{value}' is not an email address"),
        });
    }
    Ok(())
}

impl Database {
    /// Creates a hotel record.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or the email is
    /// malformed, or a database error if the insert fails (including a
    /// duplicate email).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::{Database, DatabaseConfig};
    ///
    /// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
    /// let hotel = db
    ///     .add_hotel("Seaside Inn", "desk@seaside.example", None, None)
    ///     .unwrap();
    /// println!("created hotel {}", hotel.id());
    /// ```
    pub fn add_hotel(
        &mut self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Hotel> {
        require_non_empty("name", name)?;
        require_email("email", email)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO hotels (name, email, phone, address) VALUES (?, ?, ?, ?)",
            params![name, email, phone, address],
        )?;
        let id = HotelId::new(tx.last_insert_rowid());
        tx.commit()?;

        Ok(Hotel::from_parts(
            id,
            name.to_string(),
            email.to_string(),
            phone.map(ToString::to_string),
            address.map(ToString::to_string),
        ))
    }

    /// Retrieves a hotel by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn hotel(&self, id: HotelId) -> Result<Option<Hotel>> {
        Self::hotel_with(&self.conn, id)
    }

    /// Retrieves a hotel using an existing connection or transaction.
    pub(crate) fn hotel_with(conn: &Connection, id: HotelId) -> Result<Option<Hotel>> {
        let mut stmt = conn.prepare(SELECT_HOTEL)?;
        Ok(stmt
            .query_row(params![id.value()], row_to_hotel)
            .optional()?)
    }

    /// Lists all hotels, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_hotels(&self) -> Result<Vec<Hotel>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email, phone, address FROM hotels ORDER BY name")?;
        let hotels = stmt
            .query_map([], row_to_hotel)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(hotels)
    }

    /// Creates a room record in the given hotel.
    ///
    /// New rooms start with the advisory availability flag set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the hotel does not exist, or a
    /// database error if the insert fails (including a duplicate room
    /// number within the hotel).
    pub fn add_room(
        &mut self,
        hotel: HotelId,
        number: u32,
        complement: Option<&str>,
    ) -> Result<Room> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if Self::hotel_with(&tx, hotel)?.is_none() {
            return Err(Error::NotFound {
                resource: format!("hotel {hotel}"),
            });
        }

        tx.execute(
            "INSERT INTO rooms (hotel_id, number, complement, is_available) VALUES (?, ?, ?, 1)",
            params![hotel.value(), number, complement],
        )?;
        let id = RoomId::new(tx.last_insert_rowid());
        tx.commit()?;

        Ok(Room::from_parts(
            id,
            hotel,
            number,
            complement.map(ToString::to_string),
            true,
        ))
    }

    /// Retrieves a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn room(&self, id: RoomId) -> Result<Option<Room>> {
        Self::room_with(&self.conn, id)
    }

    /// Retrieves a room using an existing connection or transaction.
    pub(crate) fn room_with(conn: &Connection, id: RoomId) -> Result<Option<Room>> {
        let mut stmt = conn.prepare(SELECT_ROOM)?;
        Ok(stmt.query_row(params![id.value()], row_to_room).optional()?)
    }

    /// Lists the rooms of a hotel, ordered by room number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&self, hotel: HotelId) -> Result<Vec<Room>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, hotel_id, number, complement, is_available
             FROM rooms WHERE hotel_id = ? ORDER BY number",
        )?;
        let rooms = stmt
            .query_map(params![hotel.value()], row_to_room)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rooms)
    }

    /// Sets the advisory availability flag on a room.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the room was found and updated
    /// - `Ok(false)` if the room was not found
    pub fn set_room_available(&mut self, id: RoomId, available: bool) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let rows = tx.execute(
            "UPDATE rooms SET is_available = ? WHERE id = ?",
            params![available, id.value()],
        )?;
        tx.commit()?;
        Ok(rows > 0)
    }

    /// Creates a customer record.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty or the email is
    /// malformed, or a database error if the insert fails (including a
    /// duplicate email).
    pub fn add_customer(
        &mut self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        preferences: Option<&serde_json::Value>,
    ) -> Result<Customer> {
        require_non_empty("name", name)?;
        require_email("email", email)?;

        let preferences_raw = preferences.map(serde_json::Value::to_string);

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO customers (name, email, phone, preferences) VALUES (?, ?, ?, ?)",
            params![name, email, phone, preferences_raw],
        )?;
        let id = CustomerId::new(tx.last_insert_rowid());
        tx.commit()?;

        Ok(Customer::from_parts(
            id,
            name.to_string(),
            email.to_string(),
            phone.map(ToString::to_string),
            preferences.cloned(),
        ))
    }

    /// Retrieves a customer by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        Self::customer_with(&self.conn, id)
    }

    /// Retrieves a customer using an existing connection or transaction.
    pub(crate) fn customer_with(conn: &Connection, id: CustomerId) -> Result<Option<Customer>> {
        let mut stmt = conn.prepare(SELECT_CUSTOMER)?;
        Ok(stmt
            .query_row(params![id.value()], row_to_customer)
            .optional()?)
    }

    /// Lists all customers, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, email, phone, preferences FROM customers ORDER BY name")?;
        let customers = stmt
            .query_map([], row_to_customer)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(customers)
    }
}
