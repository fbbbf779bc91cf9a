//! Interactive writing session over a line-oriented input.
//!
//! The terminal is the input surface: every line read appends to an
//! in-memory buffer and the whole buffer is handed to the [`Segmenter`] as
//! one text change. When a pause opens a new session, the buffer starts over
//! once the previous entry is known to be stored; if that fails, the text is
//! kept and carried into the new entry instead of being dropped.

use crate::db::EntryStore;
use crate::errors::AppResult;
use crate::session::{Segmenter, TextChange};
use chrono::NaiveDateTime;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{error, info};

/// Counts for a finished writing session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Lines read from the input.
    pub lines: usize,
    /// Entries created.
    pub entries_opened: usize,
    /// Text changes whose entry could not be created.
    pub failed_opens: usize,
}

/// Reads `input` to the end, feeding each line to a fresh segmenter.
///
/// `clock` supplies the time of each line. Store failures are reported to
/// stderr and the session keeps going; only an input error ends it early.
///
/// # Errors
///
/// Returns an error if reading the input fails or the final flush fails.
pub async fn run_write_session<S, R, C>(store: Arc<S>, input: R, mut clock: C) -> AppResult<WriteSummary>
where
    S: EntryStore + 'static,
    R: AsyncBufRead + Unpin,
    C: FnMut() -> NaiveDateTime,
{
    let mut segmenter = Segmenter::new(store);
    let mut buffer = String::new();
    let mut summary = WriteSummary::default();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        summary.lines += 1;
        let now = clock();

        // Opening the next entry flushes this one too; flushing here first
        // tells us whether the buffer can start over
        if segmenter.starts_new_session(now) && segmenter.state().open_entry.is_some() {
            match segmenter.finish() {
                Ok(_) => buffer.clear(),
                Err(e) => {
                    error!("Could not save the previous entry: {}", e);
                    eprintln!("Could not save the previous entry ({}); its text is kept", e);
                }
            }
        }

        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(&line);

        match segmenter.on_text_change(&buffer, now) {
            Ok(TextChange::Opened(id)) => {
                summary.entries_opened += 1;
                info!("Writing to entry {}", id);
            }
            Ok(_) => {}
            Err(e) => {
                summary.failed_opens += 1;
                error!("Could not create entry: {}", e);
                eprintln!("Could not save entry ({}); keep typing to retry", e);
            }
        }
    }

    segmenter.finish()?;
    info!(
        "Writing session ended: {} lines, {} entries",
        summary.lines, summary.entries_opened
    );
    Ok(summary)
}
