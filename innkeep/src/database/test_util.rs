//! Shared fixtures for database unit tests.

use crate::customer::CustomerId;
use crate::room::RoomId;

use super::config::DatabaseConfig;
use super::connection::Database;

/// Creates an initialized database in a temporary location.
///
/// The temporary directory is leaked so the database file outlives the
/// returned handle for the duration of the test process.
pub(crate) fn create_test_database() -> Database {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    std::mem::forget(dir);
    Database::open(DatabaseConfig::new(path)).unwrap()
}

/// Seeds a hotel, one room, and one customer, returning the ids the
/// booking tests need.
pub(crate) fn seed_booking_fixture(db: &mut Database) -> (RoomId, CustomerId) {
    let hotel = db
        .add_hotel("Seaside Inn", "desk@seaside.example", None, None)
        .unwrap();
    let room = db.add_room(hotel.id(), 101, None).unwrap();
    let customer = db
        .add_customer("Ada Brook", "ada@example.com", None, None)
        .unwrap();
    (room.id(), customer.id())
}
