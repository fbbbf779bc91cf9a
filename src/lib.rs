/*!
# Jotter

Jotter is a minimal journal: you type, it timestamps and stores what you
typed, and later you browse entries by calendar date.

## Core Features

- Typing sessions become entries: a pause of more than three minutes starts
  a new entry, anything shorter keeps amending the current one
- Bursts of changes are coalesced into a single write after half a second
  of quiet
- List the dates that have entries and view the timeline of a day
- Export to JSON or CSV and import either format back

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `db`: SQLite entry store
- `errors`: Error handling infrastructure
- `ops`: Operations behind each command
- `session`: Session segmentation and debounced amendments

## Usage Example

```rust,no_run
use jotter::db::Database;
use jotter::Config;

fn main() -> jotter::AppResult<()> {
    let config = Config::load()?;
    jotter::config::ensure_data_dir(&config.data_dir)?;

    let db = Database::open(&config.db_path())?;
    db.initialize_schema()?;

    for date in db.list_dates_with_entries()? {
        println!("{}", date);
    }
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// SQLite storage of journal entries
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Operations behind the CLI commands
pub mod ops;
/// Session segmentation of text changes
pub mod session;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use db::{Database, Entry, EntryStore};
pub use errors::{AppError, AppResult};
pub use session::Segmenter;
