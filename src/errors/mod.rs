//! Error handling utilities for the jotter application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur when claiming the single-writer lock.
///
/// # Examples
///
/// ```
/// use jotter::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::DatabaseBusy {
///     path: PathBuf::from("/path/to/journal.db.lock"),
/// };
///
/// assert!(format!("{}", error).contains("another jotter process"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the writer lock.
    #[error("Journal is being written by another jotter process (lock: {path}). Finish that session first.")]
    DatabaseBusy {
        /// The lock file that is held
        path: PathBuf,
    },

    /// The lock file could not be created or locked for a technical reason.
    #[error("Failed to acquire writer lock {path}: {source}. Please check permissions on the data directory.")]
    AcquisitionFailed {
        /// The lock file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents specific error cases that can occur during database operations.
///
/// This is the storage error of the journal: any failure of the medium,
/// the connection pool or a statement ends up here.
///
/// # Examples
///
/// ```
/// use jotter::errors::DatabaseError;
///
/// let error = DatabaseError::NotFound("Entry with id 123 not found".to_string());
/// assert!(format!("{}", error).contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}")]
    Pool(#[from] r2d2::Error),

    /// Requested entry not found in database.
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Custom database error with detailed message.
    #[error("Database error: {0}")]
    Custom(String),
}

/// Errors raised while exporting or importing entries.
///
/// # Examples
///
/// ```
/// use jotter::errors::TransferError;
///
/// let error = TransferError::InvalidRecord {
///     index: 3,
///     reason: "invalid date '2024-13-01'".to_string(),
/// };
/// assert!(format!("{}", error).contains("record 3"));
/// ```
#[derive(Debug, Error)]
pub enum TransferError {
    /// The file extension or requested format is not JSON or CSV.
    #[error("Unsupported transfer format: {0}. Use .json or .csv")]
    UnsupportedFormat(String),

    /// JSON could not be produced or parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV could not be produced or parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record parsed but its fields are not usable.
    #[error("Invalid import record {index}: {reason}")]
    InvalidRecord {
        /// Zero-based position of the record in the input
        index: usize,
        /// What was wrong with it
        reason: String,
    },
}

/// Represents all possible errors that can occur in the jotter application.
///
/// Note: This type does not implement `Clone` to avoid losing error context when
/// cloning `std::io::Error` values.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use jotter::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use jotter::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem or terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal logic (e.g., invalid date formats).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors related to export and import.
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    /// Errors related to the writer lock.
    #[error("Lock error: {0}")]
    Lock(#[from] LockError),
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Database(DatabaseError::Sqlite(err))
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use jotter::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let app_io_error = AppError::Io(io_error);
        assert_eq!(format!("{}", app_io_error), "I/O error: permission denied");

        let journal_error = AppError::Journal("Invalid date".to_string());
        assert_eq!(
            format!("{}", journal_error),
            "Journal logic error: Invalid date"
        );

        let lock_error = LockError::DatabaseBusy {
            path: PathBuf::from("/data/journal.db.lock"),
        };
        let app_error = AppError::Lock(lock_error);
        assert!(format!("{}", app_error).contains("Lock error"));
        assert!(format!("{}", app_error).contains("/data/journal.db.lock"));
    }

    #[test]
    fn test_sqlite_error_converts_to_database_variant() {
        let app_error: AppError = rusqlite::Error::QueryReturnedNoRows.into();
        match app_error {
            AppError::Database(DatabaseError::Sqlite(rusqlite::Error::QueryReturnedNoRows)) => {}
            other => panic!("Expected AppError::Database(Sqlite), got {:?}", other),
        }
    }

    #[test]
    fn test_transfer_error_variants() {
        let error = TransferError::UnsupportedFormat("xml".to_string());
        assert!(format!("{}", error).contains("xml"));
        assert!(format!("{}", error).contains(".json or .csv"));

        let json_err = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let app_error: AppError = TransferError::from(json_err).into();
        assert!(format!("{}", app_error).starts_with("Transfer error: JSON error"));
    }

    #[test]
    fn test_lock_error_variants() {
        let error = LockError::DatabaseBusy {
            path: PathBuf::from("/data/journal.db.lock"),
        };
        assert!(format!("{}", error).contains("another jotter process"));

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let error = LockError::AcquisitionFailed {
            path: PathBuf::from("/data/journal.db.lock"),
            source: io_error,
        };
        assert!(format!("{}", error).contains("Failed to acquire writer lock"));
        assert!(format!("{}", error).contains("permission denied"));
    }

    #[test]
    fn test_result_combinators() {
        let io_result: Result<(), io::Error> = Err(io::Error::other("test error"));
        let app_result: AppResult<()> = io_result.map_err(AppError::Io);

        match app_result {
            Err(AppError::Io(inner)) => {
                assert_eq!(inner.kind(), io::ErrorKind::Other);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }
}
