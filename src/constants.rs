//! Constants used throughout the application.
//!
//! This module contains all constants used in the jotter application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

use std::time::Duration;

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "jotter";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A minimal journal that turns typing sessions into timestamped entries";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used with `--verbose`.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the jotter data directory.
pub const ENV_VAR_JOTTER_DIR: &str = "JOTTER_DIR";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for the data directory within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = "Documents/jotter";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "journal.db";
/// File name of the single-writer lock inside the data directory.
pub const LOCK_FILE_NAME: &str = "journal.db.lock";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Maximum number of pooled SQLite connections.
pub const DB_POOL_SIZE: u32 = 4;

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD). Entry `date` column.
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Date format string for compact date format (YYYYMMDD).
pub const DATE_FORMAT_COMPACT: &str = "%Y%m%d";
/// Clock format of an entry `timestamp` column (24-hour HH:MM).
pub const TIMESTAMP_FORMAT: &str = "%H:%M";

// Session Segmentation
/// Idle gap after which the next keystroke opens a new entry.
pub const SESSION_GAP: Duration = Duration::from_secs(3 * 60);
/// Quiescence period before a continuing session's text is written.
pub const AMEND_DEBOUNCE: Duration = Duration::from_millis(500);

// Export / Import
/// Header row of CSV exports.
pub const CSV_HEADER: [&str; 3] = ["Date", "Time", "Content"];
/// Default file name for JSON exports.
pub const JSON_EXPORT_FILE_NAME: &str = "journal_entries.json";
/// Default file name for CSV exports.
pub const CSV_EXPORT_FILE_NAME: &str = "journal_entries.csv";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "jotter";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
