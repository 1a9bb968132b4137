//! Database layer for persistent storage of bookings.
//!
//! This module provides the SQLite-backed store for hotels, rooms,
//! customers, and reservations: connection management, schema
//! versioning, catalog CRUD, and the reservation queries the admission
//! check is built on.
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::{Database, DatabaseConfig};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//!
//! let hotel = db
//!     .add_hotel("Seaside Inn", "desk@seaside.example", None, None)
//!     .unwrap();
//! let room = db.add_room(hotel.id(), 101, None).unwrap();
//!
//! for reservation in db.list_reservations_for_room(room.id()).unwrap() {
//!     println!("{:?}", reservation);
//! }
//! ```

mod catalog;
mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use schema::CURRENT_SCHEMA_VERSION;

pub(crate) use operations::{systemtime_to_unix_secs, unix_secs_to_systemtime};
