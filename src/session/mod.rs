//! Session segmentation of a stream of text changes.
//!
//! A *session* is a run of typing with no pause longer than
//! [`SESSION_GAP`](crate::constants::SESSION_GAP). The first change of a
//! session inserts a new entry stamped with the current time; later changes
//! amend that entry, coalesced by a [`Debouncer`] so a burst of keystrokes
//! costs a single write.
//!
//! ```no_run
//! use chrono::Local;
//! use jotter::db::Database;
//! use jotter::session::Segmenter;
//! use std::sync::Arc;
//!
//! # async fn demo() -> jotter::AppResult<()> {
//! let db = Arc::new(Database::open_in_memory()?);
//! db.initialize_schema()?;
//!
//! let mut segmenter = Segmenter::new(db);
//! segmenter.on_text_change("Hello", Local::now().naive_local())?;
//! segmenter.on_text_change("Hello world", Local::now().naive_local())?;
//! segmenter.finish()?;
//! # Ok(())
//! # }
//! ```

pub mod debounce;

pub use debounce::Debouncer;

use crate::constants::{AMEND_DEBOUNCE, DATE_FORMAT_ISO, SESSION_GAP, TIMESTAMP_FORMAT};
use crate::db::EntryStore;
use crate::errors::AppResult;
use chrono::NaiveDateTime;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Latest text of the open entry that is not known to be stored yet.
type Unsaved = Arc<Mutex<Option<(i64, String)>>>;

/// What a text change did to the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextChange {
    /// A new session began and the entry with this id was created.
    Opened(i64),
    /// The open entry will be amended once typing pauses.
    Scheduled(i64),
    /// Nothing to write: blank text, or no entry is open.
    Ignored,
}

/// Segmentation state between two events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionState {
    /// When the last accepted text change happened.
    pub last_event: Option<NaiveDateTime>,
    /// The entry that continuing changes amend.
    pub open_entry: Option<i64>,
}

/// Decides between opening a new entry and amending the open one.
///
/// Events are expected strictly in order from a single input surface.
/// Must be driven from within a tokio runtime because amendments run on a
/// timer task.
pub struct Segmenter<S: EntryStore + 'static> {
    store: Arc<S>,
    gap: Duration,
    debouncer: Debouncer,
    state: SessionState,
    unsaved: Unsaved,
}

impl<S: EntryStore + 'static> Segmenter<S> {
    /// Creates a segmenter with no open session.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            gap: SESSION_GAP,
            debouncer: Debouncer::new(AMEND_DEBOUNCE),
            state: SessionState::default(),
            unsaved: Arc::new(Mutex::new(None)),
        }
    }

    /// Current segmentation state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether an amendment is waiting for typing to pause.
    pub fn has_pending_amendment(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Handles one text change carrying the full current `text` at time `now`.
    ///
    /// # Errors
    ///
    /// Returns the store error if a new session could not be created. The
    /// state is then reset so the next change tries to open a session again.
    /// Failed amendments are logged by the timer task and never surface here.
    pub fn on_text_change(&mut self, text: &str, now: NaiveDateTime) -> AppResult<TextChange> {
        if self.starts_new_session(now) {
            return self.open_session(text, now);
        }

        let outcome = match self.state.open_entry {
            Some(entry_id) if !text.trim().is_empty() => {
                self.schedule_amendment(entry_id, text);
                TextChange::Scheduled(entry_id)
            }
            _ => TextChange::Ignored,
        };

        self.state.last_event = Some(now);
        Ok(outcome)
    }

    /// Writes the open entry's latest text now if it is not stored yet.
    ///
    /// Cancels a waiting amendment and writes its text directly; also
    /// covers an amendment whose timed write failed. Opening a new session
    /// does this for the previous one; call it yourself when the input
    /// stream ends. Returns `true` if something was written.
    ///
    /// # Errors
    ///
    /// Returns the store error; the text then stays unsaved and a later
    /// `finish` tries again.
    pub fn finish(&mut self) -> AppResult<bool> {
        self.debouncer.cancel();

        let mut unsaved = self.unsaved.lock().unwrap_or_else(PoisonError::into_inner);
        let Some((entry_id, text)) = unsaved.as_ref() else {
            return Ok(false);
        };

        debug!("Flushing unsaved text of entry {}", entry_id);
        let written = self.store.amend(*entry_id, text)?;
        *unsaved = None;
        Ok(written)
    }

    /// Whether a change at `now` would open a new session.
    pub fn starts_new_session(&self, now: NaiveDateTime) -> bool {
        match self.state.last_event {
            None => true,
            // A clock that moved backwards counts as continuing
            Some(last) => now
                .signed_duration_since(last)
                .to_std()
                .is_ok_and(|elapsed| elapsed > self.gap),
        }
    }

    fn open_session(&mut self, text: &str, now: NaiveDateTime) -> AppResult<TextChange> {
        // The previous session's last text must land before its timer is replaced
        if let Err(e) = self.finish() {
            error!("Could not save the previous entry: {}", e);
        }

        let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
        let date = now.format(DATE_FORMAT_ISO).to_string();

        match self.store.create(text, &timestamp, &date) {
            Ok(entry_id) => {
                info!("Opened entry {} at {} {}", entry_id, date, timestamp);
                self.state = SessionState {
                    last_event: Some(now),
                    open_entry: Some(entry_id),
                };
                Ok(TextChange::Opened(entry_id))
            }
            Err(e) => {
                warn!("Could not open a new entry: {}", e);
                self.state = SessionState::default();
                Err(e)
            }
        }
    }

    fn schedule_amendment(&mut self, entry_id: i64, text: &str) {
        *self.unsaved.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((entry_id, text.to_string()));

        let store = Arc::clone(&self.store);
        let unsaved = Arc::clone(&self.unsaved);
        let content = text.to_string();
        self.debouncer.schedule(move || match store.amend(entry_id, &content) {
            Ok(written) => {
                if written {
                    debug!("Amended entry {}", entry_id);
                } else {
                    warn!("Entry {} no longer exists, amendment dropped", entry_id);
                }
                let mut unsaved = unsaved.lock().unwrap_or_else(PoisonError::into_inner);
                if unsaved.as_ref().is_some_and(|(id, t)| *id == entry_id && *t == content) {
                    *unsaved = None;
                }
            }
            Err(e) => error!("Failed to amend entry {}: {}", entry_id, e),
        });
    }
}
