//! Database operations for journal entries.
//!
//! This module provides SQLite storage for the journal. It uses connection
//! pooling via r2d2 so the debounced writer task and the foreground session
//! can share one handle.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `entries`: Entry CRUD operations
//! - `lock`: Single-writer lock for the data directory
//!
//! # Example
//!
//! ```no_run
//! use jotter::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/journal.db"))?;
//! db.initialize_schema()?;
//! let id = db.create_entry("Hello", "09:00", "2024-01-01")?;
//! db.amend_entry(id, "Hello world")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entries;
pub mod lock;
pub mod schema;

pub use entries::{Entry, NewEntry};
pub use lock::WriterLock;

use crate::constants::DB_POOL_SIZE;
use crate::errors::{AppResult, DatabaseError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// The write side of the entry store, as seen by the session segmenter.
///
/// Implemented by [`Database`]; tests substitute in-memory fakes.
pub trait EntryStore: Send + Sync {
    /// Inserts a new entry and returns its id.
    fn create(&self, content: &str, timestamp: &str, date: &str) -> AppResult<i64>;

    /// Replaces the content of entry `id`. Returns `false` if it does not exist.
    fn amend(&self, id: i64, content: &str) -> AppResult<bool>;
}

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the journal database at `db_path`.
    ///
    /// If the database file doesn't exist, it will be created. The schema is
    /// not touched; call [`Database::initialize_schema`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database file cannot be opened
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(DB_POOL_SIZE)
            .connection_customizer(Box::new(SqliteConfig { wal: true }))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        // Fail now rather than on the first keystroke
        let conn = pool.get().map_err(DatabaseError::Pool)?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(DatabaseError::Sqlite)?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// The pool holds exactly one connection that is never recycled, since
    /// every SQLite in-memory connection is its own database.
    pub fn open_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_customizer(Box::new(SqliteConfig { wal: false }))
            .build(manager)
            .map_err(DatabaseError::Pool)?;
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }

    /// Inserts a new entry and returns its id.
    pub fn create_entry(&self, content: &str, timestamp: &str, date: &str) -> AppResult<i64> {
        let conn = self.get_conn()?;
        entries::insert_entry(&conn, content, timestamp, date)
    }

    /// Overwrites the content of entry `id`; `Ok(false)` if there is no such entry.
    pub fn amend_entry(&self, id: i64, content: &str) -> AppResult<bool> {
        let conn = self.get_conn()?;
        entries::amend_entry(&conn, id, content)
    }

    /// Fetches one entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no entry has this id.
    pub fn get_entry(&self, id: i64) -> AppResult<Entry> {
        let conn = self.get_conn()?;
        entries::get_entry(&conn, id)?
            .ok_or_else(|| DatabaseError::NotFound(format!("Entry with id {} not found", id)).into())
    }

    /// Every date with at least one entry, each listed once.
    pub fn list_dates_with_entries(&self) -> AppResult<Vec<String>> {
        let conn = self.get_conn()?;
        entries::list_dates_with_entries(&conn)
    }

    /// Entries of one calendar day (exact `YYYY-MM-DD` match), insertion order.
    pub fn list_entries_for_date(&self, date: &str) -> AppResult<Vec<Entry>> {
        let conn = self.get_conn()?;
        entries::list_entries_for_date(&conn, date)
    }

    /// Every entry, insertion order.
    pub fn list_all_entries(&self) -> AppResult<Vec<Entry>> {
        let conn = self.get_conn()?;
        entries::list_all_entries(&conn)
    }

    /// Inserts `records` with fresh ids in a single transaction.
    ///
    /// Either every record is committed or none is.
    pub fn import_entries(&self, records: &[NewEntry]) -> AppResult<usize> {
        let mut conn = self.get_conn()?;
        let count = entries::import_entries(&mut conn, records)?;
        info!("Imported {} entries", count);
        Ok(count)
    }
}

impl EntryStore for Database {
    fn create(&self, content: &str, timestamp: &str, date: &str) -> AppResult<i64> {
        self.create_entry(content, timestamp, date)
    }

    fn amend(&self, id: i64, content: &str) -> AppResult<bool> {
        self.amend_entry(id, content)
    }
}

/// Connection customizer applied to every pooled connection.
#[derive(Debug)]
struct SqliteConfig {
    wal: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for SqliteConfig {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if self.wal {
            // Lets `jotter dates` read while a `jotter write` session is open
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |_| Ok(()))?;
        }
        Ok(())
    }

    fn on_release(&self, _conn: Connection) {}
}
