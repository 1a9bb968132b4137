//! Database connection management.
//!
//! This module provides the main database connection type with the PRAGMA
//! settings the admission path relies on: WAL journaling so readers never
//! block the writer, a busy timeout so competing admission transactions
//! wait instead of failing immediately, and enforced foreign keys.

use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A booking database handle.
///
/// Wraps a `SQLite` connection configured for concurrent access. All
/// mutation goes through immediate transactions, which serialize writers
/// and make the admission check-then-insert atomic.
///
/// # Examples
///
/// ```no_run
/// use innkeep::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/innkeep.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory if `auto_create` is enabled
    /// - Open the database with appropriate flags
    /// - Set WAL mode for concurrent access
    /// - Configure the busy timeout and enable foreign keys
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened
    /// - The parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - Schema initialization or verification fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::{Database, DatabaseConfig};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
    /// ```
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if config.auto_create && !config.path.exists() {
            if let Some(parent) = config.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else if config.auto_create {
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX
        } else {
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX
        };

        let conn = Connection::open_with_flags(&config.path, flags)?;

        // PRAGMA journal_mode returns a row, so it needs query_row.
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {}",
            config.busy_timeout.as_millis()
        ))?;

        super::migrations::check_schema_compatibility(&conn)?;

        Ok(Self { conn, config })
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    ///
    /// Provides raw access for operations that require mutability, such as
    /// externally-managed transactions.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Begins an immediate (write-locking) transaction.
    ///
    /// The write lock is taken up front, so the admission check and the
    /// subsequent insert see and produce a serialized view of the room's
    /// reservations. If another connection holds the write lock longer
    /// than the configured busy timeout, this fails with
    /// [`Error::LockTimeout`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the lock cannot be acquired in
    /// time, or a database error for any other failure.
    pub fn begin_admission(&mut self) -> Result<Transaction<'_>> {
        let timeout = self.config.busy_timeout;
        self.conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(inner, _)
                    if inner.code == rusqlite::ErrorCode::DatabaseBusy
                        || inner.code == rusqlite::ErrorCode::DatabaseLocked =>
                {
                    Error::LockTimeout {
                        seconds: timeout.as_secs(),
                    }
                }
                other => Error::Database(other),
            })
    }
}
