/*!
# Jotter - A Minimal Journal

Jotter turns typing sessions into timestamped journal entries stored in a
local SQLite database.

## Usage

```
jotter [OPTIONS] <COMMAND>

Commands:
  write   Write from stdin; pauses longer than three minutes start a new entry
  dates   List every date that has entries
  show    Show the timeline of one day
  export  Export all entries
  import  Import entries from a .json or .csv export

Options:
  -v, --verbose                 Enable verbose output
      --log-format <FORMAT>     Log output format [default: text] [possible values: text, json]
  -h, --help                    Print help information
  -V, --version                 Print version information
```

## Configuration

- `JOTTER_DIR`: The directory holding `journal.db` (defaults to "~/Documents/jotter")
- `RUST_LOG`: Overrides the log filter
*/

use chrono::Local;
use jotter::cli::{parse_date, CliArgs, Command, ExportFormat};
use jotter::config::{self, Config};
use jotter::constants::{
    DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
    VERBOSE_LOG_LEVEL,
};
use jotter::db::{Database, WriterLock};
use jotter::errors::{AppError, AppResult};
use jotter::ops::{self, TransferFormat};
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, error, info, info_span};
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so that stdout carries only command output (e.g. exports).
fn init_tracing(verbose: bool, log_format: &str) {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    if log_format == LOG_FORMAT_JSON {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(args.verbose, &args.log_format);

    let correlation_id = uuid::Uuid::new_v4();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Reported once, here at the boundary
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> AppResult<()> {
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;
    config::ensure_data_dir(&config.data_dir)?;

    let db = Database::open(&config.db_path())?;
    db.initialize_schema()?;

    match args.command {
        Command::Write => {
            let _lock = WriterLock::acquire(&config.lock_path())?;
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;

            let summary = runtime.block_on(ops::run_write_session(
                Arc::new(db),
                tokio::io::BufReader::new(tokio::io::stdin()),
                || Local::now().naive_local(),
            ))?;
            info!("Saved {} entries", summary.entries_opened);
        }
        Command::Dates => {
            let dates = ops::calendar_marks(&db)?;
            ops::print_dates(&dates, io::stdout().lock())?;
        }
        Command::Show { date } => {
            let date = match date {
                Some(raw) => parse_date(&raw)
                    .map_err(|e| AppError::Journal(format!("Invalid date format: {}", e)))?,
                None => Local::now().date_naive(),
            };
            let entries = ops::day_timeline(&db, date)?;
            ops::print_timeline(date, &entries, io::stdout().lock())?;
        }
        Command::Export { format, output } => {
            let format = match format {
                ExportFormat::Json => TransferFormat::Json,
                ExportFormat::Csv => TransferFormat::Csv,
            };
            match output {
                Some(target) => {
                    let (path, count) = ops::export_to_path(&db, format, &target)?;
                    eprintln!("Exported {} entries to {}", count, path.display());
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    ops::export_entries(&db, format, &mut stdout)?;
                    stdout.flush()?;
                }
            }
        }
        Command::Import { path } => {
            let _lock = WriterLock::acquire(&config.lock_path())?;
            let count = ops::import_file(&db, &path)?;
            eprintln!("Imported {} entries", count);
        }
    }

    Ok(())
}
