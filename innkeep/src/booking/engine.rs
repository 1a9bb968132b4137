//! The reservation commit engine.
//!
//! This module implements the admission pipeline: validate, lock,
//! re-check, insert, commit, and only then notify. The exclusive lock is
//! held from before the availability re-check until after the insert, so
//! two concurrent requests for the same room can never both observe "no
//! conflict" and both commit overlapping confirmed reservations.

use std::time::SystemTime;

use rusqlite::Transaction;

use crate::customer::Customer;
use crate::database::{systemtime_to_unix_secs, unix_secs_to_systemtime, Database};
use crate::error::{Error, Result};
use crate::hotel::Hotel;
use crate::notify::{booking_job, NotificationQueue};
use crate::reservation::{BookingStatus, Reservation, ReservationCode, ReservationId};
use crate::room::Room;

use super::request::BookingRequest;

// Random-code collisions are practically impossible at 80 bits, but a
// collision is still a retry, never a fatal error.
const MAX_CODE_ATTEMPTS: u32 = 4;

/// The commit engine for reservations.
///
/// Holds the store and an injected notification queue. Every mutation
/// runs inside a single immediate transaction; the queue is only touched
/// after a successful commit, and a queue failure never unwinds the
/// reservation.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use innkeep::notify::{LogMailer, MailSpool};
/// use innkeep::{
///     BookingEngine, BookingRequest, CustomerId, Database, DatabaseConfig, RoomId, StayRange,
/// };
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
/// let spool = MailSpool::new(LogMailer);
/// let mut engine = BookingEngine::new(&mut db, &spool);
///
/// let stay = StayRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
/// )
/// .unwrap();
/// let request = BookingRequest::new(RoomId::new(101), CustomerId::new(8), stay);
///
/// match engine.book(&request) {
///     Ok(reservation) => println!("booked, code {}", reservation.code()),
///     Err(e) if e.is_conflict() => println!("room taken for those dates"),
///     Err(e) => eprintln!("booking failed: {e}"),
/// }
/// ```
pub struct BookingEngine<'a> {
    db: &'a mut Database,
    queue: &'a dyn NotificationQueue,
}

impl<'a> BookingEngine<'a> {
    /// Creates an engine over the given store and notification queue.
    #[must_use]
    pub fn new(db: &'a mut Database, queue: &'a dyn NotificationQueue) -> Self {
        Self { db, queue }
    }

    /// Books a room for a customer over a stay.
    ///
    /// The admission sequence:
    ///
    /// 1. The requested status is validated (a reservation cannot be
    ///    created as `Cancelled`); date ordering was already enforced by
    ///    [`StayRange`](crate::StayRange).
    /// 2. An exclusive write transaction is opened.
    /// 3. Room and customer existence, the room's advisory flag, and the
    ///    overlap predicate are all evaluated against the locked
    ///    snapshot.
    /// 4. A fresh reservation code is generated and the row inserted; a
    ///    code collision regenerates and retries.
    /// 5. The transaction commits. Any failure before this point rolls
    ///    back the whole unit with no partial state.
    /// 6. A notification job is handed to the queue, fire-and-forget.
    ///
    /// # Errors
    ///
    /// - [`Error::RoomNotFound`] / [`Error::CustomerNotFound`] if a
    ///   reference does not resolve
    /// - [`Error::RoomUnavailable`] if the advisory flag is off or a
    ///   confirmed reservation overlaps the stay
    /// - [`Error::Validation`] if the requested status is `Cancelled`
    /// - [`Error::LockTimeout`] if another admission holds the lock for
    ///   longer than the configured busy timeout
    /// - [`Error::Database`] for any other storage failure
    pub fn book(&mut self, request: &BookingRequest) -> Result<Reservation> {
        let status = request.status_or_default();
        if status == BookingStatus::Cancelled {
            return Err(Error::Validation {
                field: "booking_status".into(),
                message: "a reservation cannot be created as Cancelled".into(),
            });
        }

        // Truncated to whole seconds so the returned record matches what a
        // re-read from the store will produce.
        let created_secs = systemtime_to_unix_secs(SystemTime::now())?;
        let created_at = unix_secs_to_systemtime(created_secs);

        let tx = self.db.begin_admission()?;

        let room = Database::room_with(&tx, request.room())?
            .ok_or(Error::RoomNotFound(request.room()))?;
        let customer = Database::customer_with(&tx, request.customer())?
            .ok_or(Error::CustomerNotFound(request.customer()))?;
        let hotel = Database::hotel_with(&tx, room.hotel())?.ok_or_else(|| Error::NotFound {
            resource: format!("hotel {}", room.hotel()),
        })?;

        // The advisory flag is a cheap first gate; the overlap predicate
        // against the locked snapshot is the authoritative one.
        if !room.is_available()
            || Database::overlap_exists(&tx, room.id(), request.stay(), None)?
        {
            return Err(Error::RoomUnavailable {
                room: room.id(),
                check_in: request.stay().check_in(),
                check_out: request.stay().check_out(),
            });
        }

        let (id, code) = insert_with_fresh_code(&tx, request, status, created_secs)?;
        tx.commit()?;

        let reservation = Reservation::from_parts(
            id,
            code,
            customer.id(),
            room.id(),
            *request.stay(),
            status,
            created_at,
        );
        log::info!(
            "booked reservation {} (room {}, {})",
            reservation.code(),
            room.id(),
            reservation.stay()
        );

        self.send_notification(&reservation, &customer, &room, &hotel);
        Ok(reservation)
    }

    /// Confirms a pending reservation.
    ///
    /// Confirmation re-runs the admission check under the same lock
    /// discipline as [`book`](Self::book): the set of confirmed
    /// reservations must stay pairwise non-overlapping no matter which
    /// path added to it. Confirming an already-confirmed reservation is a
    /// no-op; confirming a cancelled one is a status-machine violation.
    ///
    /// The confirmation message is queued exactly when the status
    /// actually transitions.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - [`Error::StatusTransition`] if the reservation is cancelled
    /// - [`Error::RoomUnavailable`] if a conflicting reservation was
    ///   confirmed in the meantime
    pub fn confirm(&mut self, id: ReservationId) -> Result<Reservation> {
        let tx = self.db.begin_admission()?;

        let existing = require_reservation(&tx, id)?;
        match existing.status() {
            BookingStatus::Confirmed => {
                drop(tx);
                return Ok(existing);
            }
            BookingStatus::Cancelled => {
                return Err(Error::StatusTransition {
                    from: BookingStatus::Cancelled,
                    to: BookingStatus::Confirmed,
                })
            }
            BookingStatus::Pending => {}
        }

        if Database::overlap_exists(&tx, existing.room(), existing.stay(), Some(id))? {
            return Err(Error::RoomUnavailable {
                room: existing.room(),
                check_in: existing.stay().check_in(),
                check_out: existing.stay().check_out(),
            });
        }

        Database::update_status(&tx, id, BookingStatus::Confirmed)?;
        let (customer, room, hotel) = load_contacts(&tx, &existing)?;
        tx.commit()?;

        let confirmed = Reservation::from_parts(
            existing.id(),
            existing.code().clone(),
            existing.customer(),
            existing.room(),
            *existing.stay(),
            BookingStatus::Confirmed,
            existing.created_at(),
        );
        log::info!("confirmed reservation {}", confirmed.code());

        self.send_notification(&confirmed, &customer, &room, &hotel);
        Ok(confirmed)
    }

    /// Cancels a reservation.
    ///
    /// `Cancelled` is terminal: cancelling an already-cancelled
    /// reservation is a status-machine violation. No notification is
    /// sent for cancellations.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - [`Error::StatusTransition`] if the reservation is already
    ///   cancelled
    pub fn cancel(&mut self, id: ReservationId) -> Result<Reservation> {
        let tx = self.db.begin_admission()?;

        let existing = require_reservation(&tx, id)?;
        if !existing.status().can_transition_to(BookingStatus::Cancelled) {
            return Err(Error::StatusTransition {
                from: existing.status(),
                to: BookingStatus::Cancelled,
            });
        }

        Database::update_status(&tx, id, BookingStatus::Cancelled)?;
        tx.commit()?;

        log::info!("cancelled reservation {}", existing.code());

        Ok(Reservation::from_parts(
            existing.id(),
            existing.code().clone(),
            existing.customer(),
            existing.room(),
            *existing.stay(),
            BookingStatus::Cancelled,
            existing.created_at(),
        ))
    }

    fn send_notification(
        &self,
        reservation: &Reservation,
        customer: &Customer,
        room: &Room,
        hotel: &Hotel,
    ) {
        let job = booking_job(reservation, customer, room, hotel);
        let handle = self.queue.enqueue(job);
        log::debug!(
            "queued notification {} for reservation {}",
            handle,
            reservation.code()
        );
    }
}

fn require_reservation(tx: &Transaction<'_>, id: ReservationId) -> Result<Reservation> {
    Database::reservation_with(tx, id)?.ok_or_else(|| Error::NotFound {
        resource: format!("reservation {id}"),
    })
}

fn load_contacts(
    tx: &Transaction<'_>,
    reservation: &Reservation,
) -> Result<(Customer, Room, Hotel)> {
    let customer =
        Database::customer_with(tx, reservation.customer())?.ok_or_else(|| Error::NotFound {
            resource: format!("customer {}", reservation.customer()),
        })?;
    let room = Database::room_with(tx, reservation.room())?.ok_or_else(|| Error::NotFound {
        resource: format!("room {}", reservation.room()),
    })?;
    let hotel = Database::hotel_with(tx, room.hotel())?.ok_or_else(|| Error::NotFound {
        resource: format!("hotel {}", room.hotel()),
    })?;
    Ok((customer, room, hotel))
}

fn insert_with_fresh_code(
    tx: &Transaction<'_>,
    request: &BookingRequest,
    status: BookingStatus,
    created_secs: i64,
) -> Result<(ReservationId, ReservationCode)> {
    let mut attempts = 0;
    loop {
        attempts += 1;
        let code = ReservationCode::generate();
        match Database::insert_reservation(
            tx,
            &code,
            request.customer(),
            request.room(),
            request.stay(),
            status,
            created_secs,
        ) {
            Ok(id) => return Ok((id, code)),
            Err(e) if is_code_collision(&e) && attempts < MAX_CODE_ATTEMPTS => {
                log::warn!("reservation code collision on attempt {attempts}; regenerating");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn is_code_collision(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(inner, Some(message)) => {
            inner.code == rusqlite::ErrorCode::ConstraintViolation
                && message.contains("reservations.code")
        }
        _ => false,
    }
}
