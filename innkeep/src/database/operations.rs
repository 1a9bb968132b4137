//! Database operations for reservations.
//!
//! This module implements the reservation queries and mutations,
//! including the overlap predicate the admission check is built on.
//! Functions taking a raw [`Connection`] are intended for use inside an
//! already-open admission transaction; `&self` methods open their own.

use std::time::{Duration, SystemTime};

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use crate::customer::CustomerId;
use crate::error::{Error, Result};
use crate::reservation::{BookingStatus, Reservation, ReservationCode, ReservationId};
use crate::room::RoomId;
use crate::stay::StayRange;

use super::connection::Database;
use super::schema::{COUNT_OVERLAPPING, INSERT_RESERVATION};

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn systemtime_to_unix_secs(time: SystemTime) -> Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| Error::Validation {
            field: "created_at".into(),
            message: format!("invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs as u64)
}

/// Deserializes a reservation from a database row.
///
/// Expects row fields in this order: id, code, `customer_id`, `room_id`,
/// `check_in`, `check_out`, `booking_status`, `created_at`.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let code: String = row.get(1)?;
    let customer: i64 = row.get(2)?;
    let room: i64 = row.get(3)?;
    let check_in: chrono::NaiveDate = row.get(4)?;
    let check_out: chrono::NaiveDate = row.get(5)?;
    let status: String = row.get(6)?;
    let created_secs: i64 = row.get(7)?;

    let code: ReservationCode = code
        .parse()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let stay = StayRange::new(check_in, check_out)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let status: BookingStatus = status
        .parse()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Reservation::from_parts(
        ReservationId::new(id),
        code,
        CustomerId::new(customer),
        RoomId::new(room),
        stay,
        status,
        unix_secs_to_systemtime(created_secs),
    ))
}

const SELECT_COLUMNS: &str =
    "id, code, customer_id, room_id, check_in, check_out, booking_status, created_at";

impl Database {
    /// Checks whether any confirmed reservation for the room overlaps the
    /// given stay.
    ///
    /// This is the availability checker: a pure read with no side effects,
    /// using the half-open interval test (touching stays do not overlap).
    /// Pending and cancelled reservations are ignored. A nonexistent room
    /// simply has no reservations, so it reports no overlap.
    ///
    /// Outside a transaction this answers from the latest committed state,
    /// which can change before a subsequent booking; the commit engine
    /// re-evaluates the same predicate under its admission lock before
    /// inserting.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use chrono::NaiveDate;
    /// use innkeep::{Database, DatabaseConfig, RoomId, StayRange};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
    /// let stay = StayRange::new(
    ///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
    /// )
    /// .unwrap();
    ///
    /// if db.has_overlap(RoomId::new(101), &stay).unwrap() {
    ///     println!("room already booked for those nights");
    /// }
    /// ```
    pub fn has_overlap(&self, room: RoomId, stay: &StayRange) -> Result<bool> {
        Self::overlap_exists(&self.conn, room, stay, None)
    }

    /// Evaluates the overlap predicate on an existing connection or
    /// transaction, optionally excluding one reservation id.
    ///
    /// The exclusion is used when re-admitting a pending reservation: its
    /// own row must not count as a conflict.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn overlap_exists(
        conn: &Connection,
        room: RoomId,
        stay: &StayRange,
        exclude: Option<ReservationId>,
    ) -> Result<bool> {
        let count: i64 = conn.query_row(
            COUNT_OVERLAPPING,
            params![
                room.value(),
                stay.check_out(),
                stay.check_in(),
                exclude.map(ReservationId::value),
            ],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Inserts a reservation row on an existing connection or transaction.
    ///
    /// Returns the assigned reservation id. A duplicate code surfaces as a
    /// constraint violation; callers treat that as a signal to regenerate
    /// the code, not as a fatal error.
    pub(crate) fn insert_reservation(
        conn: &Connection,
        code: &ReservationCode,
        customer: CustomerId,
        room: RoomId,
        stay: &StayRange,
        status: BookingStatus,
        created_at_secs: i64,
    ) -> rusqlite::Result<ReservationId> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                code.as_str(),
                customer.value(),
                room.value(),
                stay.check_in(),
                stay.check_out(),
                status.as_str(),
                created_at_secs,
            ],
        )?;
        Ok(ReservationId::new(conn.last_insert_rowid()))
    }

    /// Retrieves a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn reservation(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Self::reservation_with(&self.conn, id)
    }

    /// Retrieves a reservation using an existing connection or transaction.
    pub(crate) fn reservation_with(
        conn: &Connection,
        id: ReservationId,
    ) -> Result<Option<Reservation>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM reservations WHERE id = ?"
        ))?;
        Ok(stmt
            .query_row(params![id.value()], row_to_reservation)
            .optional()?)
    }

    /// Retrieves a reservation by its externally-facing code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn reservation_by_code(&self, code: &ReservationCode) -> Result<Option<Reservation>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM reservations WHERE code = ?"
        ))?;
        Ok(stmt
            .query_row(params![code.as_str()], row_to_reservation)
            .optional()?)
    }

    /// Lists all reservations, most recent check-in first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be
    /// deserialized.
    pub fn list_all_reservations(&self) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM reservations ORDER BY check_in DESC, id"
        ))?;
        let reservations = stmt
            .query_map([], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(reservations)
    }

    /// Lists the reservations for a room, earliest check-in first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_room(&self, room: RoomId) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM reservations WHERE room_id = ? ORDER BY check_in, id"
        ))?;
        let reservations = stmt
            .query_map(params![room.value()], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(reservations)
    }

    /// Lists the reservations held by a customer, earliest check-in first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_customer(&self, customer: CustomerId) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM reservations WHERE customer_id = ? ORDER BY check_in, id"
        ))?;
        let reservations = stmt
            .query_map(params![customer.value()], row_to_reservation)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(reservations)
    }

    /// Updates a reservation's booking status on an existing connection or
    /// transaction.
    ///
    /// Status-machine checks belong to the caller; this is the raw write.
    pub(crate) fn update_status(
        conn: &Connection,
        id: ReservationId,
        status: BookingStatus,
    ) -> Result<bool> {
        let rows = conn.execute(
            "UPDATE reservations SET booking_status = ? WHERE id = ?",
            params![status.as_str(), id.value()],
        )?;
        Ok(rows > 0)
    }

    /// Deletes a reservation and flips its room's advisory flag back to
    /// available, in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or either write fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the reservation was found and deleted
    /// - `Ok(false)` if the reservation was not found
    pub fn delete_reservation(&mut self, id: ReservationId) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let room: Option<i64> = tx
            .query_row(
                "SELECT room_id FROM reservations WHERE id = ?",
                params![id.value()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(room) = room else {
            return Ok(false);
        };

        tx.execute("DELETE FROM reservations WHERE id = ?", params![id.value()])?;
        tx.execute(
            "UPDATE rooms SET is_available = 1 WHERE id = ?",
            params![room],
        )?;

        tx.commit()?;
        Ok(true)
    }
}
