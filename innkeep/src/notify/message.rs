//! Booking notification content.

use crate::customer::Customer;
use crate::hotel::Hotel;
use crate::reservation::{BookingStatus, Reservation};
use crate::room::Room;

use super::NotificationJob;

/// Builds the notification for a freshly booked or confirmed reservation.
///
/// The wording follows the booking status: a confirmed reservation gets a
/// "Reservation Confirmation", a pending one a "Reservation Received"
/// acknowledging that confirmation is still outstanding. The recipient is
/// the booking customer; the hotel signs off.
#[must_use]
pub fn booking_job(
    reservation: &Reservation,
    customer: &Customer,
    room: &Room,
    hotel: &Hotel,
) -> NotificationJob {
    let (subject, opening) = match reservation.status() {
        BookingStatus::Confirmed => (
            "Reservation Confirmation",
            "Your reservation has been confirmed successfully!",
        ),
        _ => (
            "Reservation Received",
            "Your reservation has been received and is awaiting confirmation.",
        ),
    };

    let body = format!(
        "Hello {name},\n\n\
         {opening}\n\n\
         Reservation Code: {code}\n\
         Customer: {name}\n\
         Hotel: {hotel}\n\
         Room: {room}\n\
         Check-in: {check_in}\n\
         Check-out: {check_out}\n\
         Booking Status: {status}\n\n\
         Best regards,\n\
         {hotel} team",
        name = customer.name(),
        code = reservation.code(),
        hotel = hotel.name(),
        room = room.number(),
        check_in = reservation.stay().check_in().format("%d/%m/%Y"),
        check_out = reservation.stay().check_out().format("%d/%m/%Y"),
        status = reservation.status(),
    );

    NotificationJob {
        subject: subject.to_string(),
        body,
        recipients: vec![customer.email().to_string()],
    }
}
