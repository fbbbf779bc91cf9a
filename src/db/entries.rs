//! Entry CRUD operations.
//!
//! This module provides functions for creating, amending, reading, and bulk
//! importing journal entries. Every function takes a plain `Connection`, so
//! callers decide where the connection comes from (pool, transaction, or an
//! in-memory database in tests).

use crate::errors::{AppResult, DatabaseError};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Represents a journal entry in the database.
///
/// `timestamp` (`HH:MM`) and `date` (`YYYY-MM-DD`) record when the writing
/// session started; only `content` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub content: String,
    pub timestamp: String,
    pub date: String,
}

/// An entry that has not been stored yet, as produced by an import file.
///
/// Any `id` present in the source is ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub content: String,
    pub timestamp: String,
    pub date: String,
}

impl From<Entry> for NewEntry {
    fn from(entry: Entry) -> Self {
        NewEntry {
            content: entry.content,
            timestamp: entry.timestamp,
            date: entry.date,
        }
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        content: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        timestamp: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        date: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    })
}

/// Inserts a new entry and returns its id.
///
/// # Arguments
///
/// * `conn` - Database connection
/// * `content` - Text of the entry
/// * `timestamp` - Session start time (`HH:MM`)
/// * `date` - Session start date (`YYYY-MM-DD`)
///
/// # Errors
///
/// Returns an error if the database operation fails. Nothing is visible
/// to readers in that case.
pub fn insert_entry(conn: &Connection, content: &str, timestamp: &str, date: &str) -> AppResult<i64> {
    debug!("Inserting entry for {} {}", date, timestamp);

    conn.execute(
        "INSERT INTO entries (content, timestamp, date) VALUES (?1, ?2, ?3)",
        params![content, timestamp, date],
    )
    .map_err(DatabaseError::Sqlite)?;

    let entry_id = conn.last_insert_rowid();
    debug!("Entry inserted with id {}", entry_id);
    Ok(entry_id)
}

/// Overwrites the content of an existing entry.
///
/// `timestamp` and `date` are never touched. An unknown id is not an
/// error: nothing is written and `Ok(false)` is returned.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn amend_entry(conn: &Connection, entry_id: i64, content: &str) -> AppResult<bool> {
    let rows_affected = conn
        .execute(
            "UPDATE entries SET content = ?1 WHERE id = ?2",
            params![content, entry_id],
        )
        .map_err(DatabaseError::Sqlite)?;

    if rows_affected == 0 {
        debug!("Amend skipped, entry {} does not exist", entry_id);
        return Ok(false);
    }

    debug!("Entry {} amended ({} chars)", entry_id, content.len());
    Ok(true)
}

/// Retrieves an entry by id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no entry has the given id.
pub fn get_entry(conn: &Connection, entry_id: i64) -> AppResult<Option<Entry>> {
    let result = conn.query_row(
        "SELECT id, content, timestamp, date FROM entries WHERE id = ?1",
        params![entry_id],
        entry_from_row,
    );

    match result {
        Ok(entry) => Ok(Some(entry)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Lists every distinct date that has at least one entry, ascending.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_dates_with_entries(conn: &Connection) -> AppResult<Vec<String>> {
    debug!("Getting dates with entries");

    let mut stmt = conn
        .prepare("SELECT DISTINCT date FROM entries WHERE date IS NOT NULL ORDER BY date")
        .map_err(DatabaseError::Sqlite)?;

    let dates = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    Ok(dates)
}

/// Lists the entries whose `date` equals `date` exactly, in insertion order.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries_for_date(conn: &Connection, date: &str) -> AppResult<Vec<Entry>> {
    debug!("Getting entries for date {}", date);

    let mut stmt = conn
        .prepare("SELECT id, content, timestamp, date FROM entries WHERE date = ?1 ORDER BY id")
        .map_err(DatabaseError::Sqlite)?;

    let entries = stmt
        .query_map(params![date], entry_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    Ok(entries)
}

/// Lists every entry in insertion order.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_all_entries(conn: &Connection) -> AppResult<Vec<Entry>> {
    let mut stmt = conn
        .prepare("SELECT id, content, timestamp, date FROM entries ORDER BY id")
        .map_err(DatabaseError::Sqlite)?;

    let entries = stmt
        .query_map([], entry_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    Ok(entries)
}

/// Inserts a batch of entries with fresh ids, all or nothing.
///
/// The batch runs in one transaction. If any insert fails the transaction
/// is rolled back, so no record of this call stays committed.
///
/// # Errors
///
/// Returns an error if the transaction cannot be started, any insert fails,
/// or the commit fails.
pub fn import_entries(conn: &mut Connection, records: &[NewEntry]) -> AppResult<usize> {
    debug!("Importing {} entries", records.len());

    let tx = conn.transaction().map_err(DatabaseError::Sqlite)?;
    for record in records {
        insert_entry(&tx, &record.content, &record.timestamp, &record.date)?;
    }
    tx.commit().map_err(DatabaseError::Sqlite)?;

    Ok(records.len())
}
