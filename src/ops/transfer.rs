//! Export and import of journal entries as JSON or CSV.
//!
//! JSON is a pretty-printed array of `{id, content, timestamp, date}`
//! objects. CSV has a `Date,Time,Content` header with one row per entry.
//! Imports always mint new ids and go through the store's all-or-nothing
//! batch insert.

use crate::constants::{CSV_EXPORT_FILE_NAME, CSV_HEADER, DATE_FORMAT_ISO, JSON_EXPORT_FILE_NAME, TIMESTAMP_FORMAT};
use crate::db::{Database, Entry, NewEntry};
use crate::errors::{AppResult, TransferError};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supported transfer formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferFormat {
    Json,
    Csv,
}

impl TransferFormat {
    /// Picks the format from a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `TransferError::UnsupportedFormat` for anything but `.json` and `.csv`.
    pub fn from_path(path: &Path) -> Result<Self, TransferError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(TransferFormat::Json),
            Some("csv") => Ok(TransferFormat::Csv),
            _ => Err(TransferError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// File name used when exporting into a directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            TransferFormat::Json => JSON_EXPORT_FILE_NAME,
            TransferFormat::Csv => CSV_EXPORT_FILE_NAME,
        }
    }
}

/// One CSV row as read back on import.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Content")]
    content: String,
}

/// Writes `entries` as a pretty-printed JSON array.
pub fn write_json<W: Write>(entries: &[Entry], mut out: W) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, entries).map_err(TransferError::Json)?;
    writeln!(out)?;
    Ok(())
}

/// Writes `entries` as CSV with a `Date,Time,Content` header.
///
/// `Time` is the entry's `HH:MM` timestamp. Content is quoted when it
/// contains a delimiter, quote or newline; inner quotes are doubled.
pub fn write_csv<W: Write>(entries: &[Entry], out: W) -> AppResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER).map_err(TransferError::Csv)?;
    for entry in entries {
        writer
            .write_record([&entry.date, &entry.timestamp, &entry.content])
            .map_err(TransferError::Csv)?;
    }
    writer.flush()?;
    Ok(())
}

/// Parses a JSON export. Source ids are discarded.
pub fn parse_json(input: &str) -> Result<Vec<NewEntry>, TransferError> {
    let records: Vec<NewEntry> = serde_json::from_str(input)?;
    normalize_records(records)
}

/// Parses a CSV export.
pub fn parse_csv(input: &str) -> Result<Vec<NewEntry>, TransferError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(input.as_bytes());

    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        records.push(NewEntry {
            content: row.content,
            timestamp: row.time,
            date: row.date,
        });
    }
    normalize_records(records)
}

/// Checks every record's date and time and rewrites them in canonical form.
///
/// Fails on the first bad record so an import is rejected before any write.
fn normalize_records(records: Vec<NewEntry>) -> Result<Vec<NewEntry>, TransferError> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            let date = NaiveDate::parse_from_str(record.date.trim(), DATE_FORMAT_ISO).map_err(|e| {
                TransferError::InvalidRecord {
                    index,
                    reason: format!("invalid date '{}': {}", record.date, e),
                }
            })?;
            let time = NaiveTime::parse_from_str(record.timestamp.trim(), TIMESTAMP_FORMAT).map_err(|e| {
                TransferError::InvalidRecord {
                    index,
                    reason: format!("invalid time '{}': {}", record.timestamp, e),
                }
            })?;

            record.date = date.format(DATE_FORMAT_ISO).to_string();
            record.timestamp = time.format(TIMESTAMP_FORMAT).to_string();
            Ok(record)
        })
        .collect()
}

/// Exports every entry in `format` to `out`. Returns the number of entries.
pub fn export_entries<W: Write>(db: &Database, format: TransferFormat, out: W) -> AppResult<usize> {
    let entries = db.list_all_entries()?;
    debug!("Exporting {} entries as {:?}", entries.len(), format);

    match format {
        TransferFormat::Json => write_json(&entries, out)?,
        TransferFormat::Csv => write_csv(&entries, out)?,
    }
    Ok(entries.len())
}

/// Exports to a file. A directory target gets the format's default file name.
///
/// Returns the path written and the number of entries.
pub fn export_to_path(db: &Database, format: TransferFormat, target: &Path) -> AppResult<(PathBuf, usize)> {
    let path = if target.is_dir() {
        target.join(format.default_file_name())
    } else {
        target.to_path_buf()
    };

    let file = fs::File::create(&path)?;
    let count = export_entries(db, format, std::io::BufWriter::new(file))?;
    info!("Exported {} entries to {:?}", count, path);
    Ok((path, count))
}

/// Imports a `.json` or `.csv` export, minting new ids.
///
/// Nothing is written unless the whole file parses and validates, and the
/// insert itself is a single transaction.
pub fn import_file(db: &Database, path: &Path) -> AppResult<usize> {
    let format = TransferFormat::from_path(path)?;
    let input = fs::read_to_string(path)?;

    let records = match format {
        TransferFormat::Json => parse_json(&input)?,
        TransferFormat::Csv => parse_csv(&input)?,
    };

    info!("Importing {} records from {:?}", records.len(), path);
    db.import_entries(&records)
}
