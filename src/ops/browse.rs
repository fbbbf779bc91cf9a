//! Read-only views: calendar marks and the timeline of a day.

use crate::constants::DATE_FORMAT_ISO;
use crate::db::{Database, Entry};
use crate::errors::AppResult;
use chrono::NaiveDate;
use std::io::{self, Write};
use tracing::debug;

/// Dates that have at least one entry, ascending, each once.
pub fn calendar_marks(db: &Database) -> AppResult<Vec<String>> {
    db.list_dates_with_entries()
}

/// Entries of `date`, ordered by the hour they were started.
///
/// Entries within the same hour keep insertion order.
pub fn day_timeline(db: &Database, date: NaiveDate) -> AppResult<Vec<Entry>> {
    let date = date.format(DATE_FORMAT_ISO).to_string();
    let mut entries = db.list_entries_for_date(&date)?;
    debug!("{} entries on {}", entries.len(), date);
    sort_by_hour(&mut entries);
    Ok(entries)
}

/// Stable sort on the hour part of `HH:MM`. Unreadable hours go last.
pub fn sort_by_hour(entries: &mut [Entry]) {
    entries.sort_by_key(|e| hour_of(&e.timestamp));
}

fn hour_of(timestamp: &str) -> u32 {
    timestamp
        .split(':')
        .next()
        .and_then(|h| h.trim().parse().ok())
        .unwrap_or(u32::MAX)
}

/// Prints one date per line.
pub fn print_dates<W: Write>(dates: &[String], mut out: W) -> io::Result<()> {
    for date in dates {
        writeln!(out, "{}", date)?;
    }
    Ok(())
}

/// Prints a timeline: the start time, then the content indented below it.
pub fn print_timeline<W: Write>(date: NaiveDate, entries: &[Entry], mut out: W) -> io::Result<()> {
    if entries.is_empty() {
        writeln!(out, "No entries for {}", date.format(DATE_FORMAT_ISO))?;
        return Ok(());
    }

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", entry.timestamp)?;
        for line in entry.content.lines() {
            writeln!(out, "    {}", line)?;
        }
    }
    Ok(())
}
