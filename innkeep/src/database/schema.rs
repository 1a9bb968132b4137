//! Database schema definitions and SQL constants.
//!
//! This module contains the table definitions, indices, and shared SQL
//! statements for the innkeep booking store.

/// Current schema version for the database.
///
/// Stored in the metadata table and checked on open to ensure the database
/// and the library agree on the layout.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the hotels table.
pub const CREATE_HOTELS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS hotels (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        phone TEXT,
        address TEXT
    )";

/// SQL statement to create the rooms table.
///
/// `is_available` is the advisory availability flag; date-range
/// availability is always recomputed from the reservations table.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY,
        hotel_id INTEGER NOT NULL REFERENCES hotels(id) ON DELETE CASCADE,
        number INTEGER NOT NULL,
        complement TEXT,
        is_available INTEGER NOT NULL DEFAULT 1,
        UNIQUE (hotel_id, number)
    )";

/// SQL statement to create the customers table.
pub const CREATE_CUSTOMERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS customers (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        phone TEXT,
        preferences TEXT
    )";

/// SQL statement to create the reservations table.
///
/// Dates are stored as ISO-8601 text, which compares correctly with plain
/// lexicographic ordering, so the overlap predicate can run in SQL. The
/// code column is UNIQUE so a random-code collision surfaces as a
/// constraint violation instead of a silent duplicate.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY,
        code TEXT NOT NULL UNIQUE,
        customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
        room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
        check_in TEXT NOT NULL,
        check_out TEXT NOT NULL,
        booking_status TEXT NOT NULL DEFAULT 'Pending',
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the admission-check index.
///
/// The overlap query filters by room and status before comparing dates;
/// this index keeps that lookup cheap for busy rooms.
pub const CREATE_ADMISSION_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_admission
    ON reservations(room_id, booking_status, check_in)";

/// SQL statement to create an index on the customer column.
///
/// Speeds up per-customer reservation listings.
pub const CREATE_CUSTOMER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_customer ON reservations(customer_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a reservation row.
///
/// Used by the commit engine inside its admission transaction.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (code, customer_id, room_id, check_in, check_out, booking_status, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";

/// SQL statement counting confirmed reservations that overlap a stay.
///
/// The half-open interval test: an existing stay conflicts iff its
/// check-in is before the candidate check-out and its check-out is after
/// the candidate check-in. Parameter 4 optionally excludes one
/// reservation id (used when re-admitting a pending reservation).
pub const COUNT_OVERLAPPING: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE room_id = ?1
      AND booking_status = 'Confirmed'
      AND check_in < ?2
      AND check_out > ?3
      AND (?4 IS NULL OR id <> ?4)
";
