//! High-level operations behind the CLI commands.
//!
//! This module provides user-facing operations that orchestrate the core
//! functionality: the interactive writing session, browsing entries by date,
//! and moving entries in and out as JSON or CSV.

pub mod browse;
pub mod transfer;
pub mod write;

// Re-export commonly used functions
pub use browse::{calendar_marks, day_timeline, print_dates, print_timeline, sort_by_hour};
pub use transfer::{export_entries, export_to_path, import_file, TransferFormat};
pub use write::{run_write_session, WriteSummary};
