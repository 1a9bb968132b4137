//! Reservation admission and commit.
//!
//! Booking a room is a two-component pipeline:
//!
//! 1. **Availability check** — a pure read answering whether any
//!    confirmed reservation overlaps a requested stay
//!    ([`Database::has_overlap`](crate::Database::has_overlap)). Useful
//!    for quick feedback, but never sufficient on its own: the answer can
//!    go stale the moment another booking commits.
//! 2. **Commit** — [`BookingEngine::book`] re-evaluates the same
//!    predicate inside an exclusive write transaction and inserts the
//!    reservation before releasing the lock, so concurrent requests for
//!    the same room are serialized and at most one can win a contested
//!    date range.
//!
//! The engine also owns the administrative transitions
//! ([`confirm`](BookingEngine::confirm), [`cancel`](BookingEngine::cancel))
//! since confirming a pending hold must pass the same admission gate.

mod engine;
mod request;

pub use engine::BookingEngine;
pub use request::BookingRequest;
