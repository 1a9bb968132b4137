//! Database schema management and migrations.
//!
//! This module handles schema initialization, version checking, and
//! forward-compatibility guards for the booking store.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_ADMISSION_INDEX, CREATE_CUSTOMERS_TABLE, CREATE_CUSTOMER_INDEX, CREATE_HOTELS_TABLE,
    CREATE_METADATA_TABLE, CREATE_RESERVATIONS_TABLE, CREATE_ROOMS_TABLE, CURRENT_SCHEMA_VERSION,
    INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices, and metadata for a fresh database. Every
/// statement is `IF NOT EXISTS`, so calling this on an initialized
/// database is harmless.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use innkeep::database::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_HOTELS_TABLE, [])?;
    conn.execute(CREATE_ROOMS_TABLE, [])?;
    conn.execute(CREATE_CUSTOMERS_TABLE, [])?;
    conn.execute(CREATE_RESERVATIONS_TABLE, [])?;
    conn.execute(CREATE_ADMISSION_INDEX, [])?;
    conn.execute(CREATE_CUSTOMER_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Reads the schema version recorded in the database.
///
/// # Errors
///
/// Returns an error if the query fails or the recorded value is not an
/// integer.
///
/// # Returns
///
/// - `Ok(Some(version))` if a version is recorded
/// - `Ok(None)` if the metadata table does not exist yet (fresh database)
pub fn get_schema_version(conn: &Connection) -> Result<Option<i32>> {
    let has_metadata: bool = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'metadata'",
        [],
        |row| row.get::<_, i64>(0).map(|count| count > 0),
    )?;

    if !has_metadata {
        return Ok(None);
    }

    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| row.get::<_, String>(0)) {
        Ok(value) => {
            let version = value
                .parse::<i32>()
                .map_err(|_| Error::DatabaseCorruption {
                    details: format!("schema_version is not an integer: {value}"),
                })?;
            Ok(Some(version))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Checks that the database schema is compatible with this library.
///
/// A fresh database (no recorded version) is initialized in place. A
/// database with a different recorded version is rejected: there is no
/// in-place upgrade path across schema versions.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] if the recorded version
/// does not match [`CURRENT_SCHEMA_VERSION`], or a database error if the
/// version cannot be read.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    match get_schema_version(conn)? {
        None => initialize_schema(conn),
        Some(version) if version == CURRENT_SCHEMA_VERSION => Ok(()),
        Some(version) => Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        }),
    }
}
