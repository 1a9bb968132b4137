#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! A library for hotel reservation admission and booking management.
//!
//! This library provides the core types and logic for admitting,
//! persisting, and administering room reservations: a pure availability
//! check over half-open date intervals, and a commit engine that
//! re-validates that check under an exclusive lock so concurrent
//! requests for the same room can never both book overlapping confirmed
//! stays.
//!
//! ## Core Types
//!
//! - [`StayRange`]: validated half-open `[check_in, check_out)` intervals
//! - [`Reservation`], [`ReservationCode`], [`BookingStatus`]: the booking
//!   record and its lifecycle
//! - [`BookingEngine`] and [`BookingRequest`]: the admission and commit
//!   pipeline
//! - [`Database`]: SQLite-backed storage for hotels, rooms, customers,
//!   and reservations
//! - [`NotificationQueue`] and [`notify::MailSpool`]: post-commit
//!   notification dispatch with bounded retries
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use innkeep::StayRange;
//!
//! let stay = StayRange::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
//! )
//! .unwrap();
//! let next = StayRange::new(
//!     NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(),
//! )
//! .unwrap();
//!
//! // Touching stays share no night, so both can be confirmed.
//! assert!(!stay.overlaps(&next));
//! ```

pub mod booking;
pub mod config;
pub mod customer;
pub mod database;
pub mod error;
pub mod hotel;
pub mod logging;
pub mod notify;
pub mod reservation;
pub mod room;
pub mod stay;

// Re-export key types at crate root for convenience
pub use booking::{BookingEngine, BookingRequest};
pub use config::{Config, ConfigBuilder};
pub use customer::{Customer, CustomerId};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use hotel::{Hotel, HotelId};
pub use logging::{init_logger, LogLevel, Logger};
pub use notify::{JobHandle, NotificationJob, NotificationQueue};
pub use reservation::{BookingStatus, Reservation, ReservationCode, ReservationId};
pub use room::{Room, RoomId};
pub use stay::StayRange;
