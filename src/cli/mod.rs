use crate::constants::{APP_DESCRIPTION, APP_NAME, DATE_FORMAT_COMPACT, LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// A minimal journal that turns typing sessions into timestamped entries
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,

    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[clap(long, global = true, default_value = LOG_FORMAT_TEXT, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: String,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Write from stdin; pauses longer than three minutes start a new entry
    Write,

    /// List every date that has entries
    Dates,

    /// Show the timeline of one day (format: YYYY-MM-DD or YYYYMMDD, default today)
    Show {
        date: Option<String>,
    },

    /// Export all entries
    Export {
        /// Output format
        #[clap(short = 'f', long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// File or directory to write to (stdout if omitted)
        #[clap(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Import entries from a .json or .csv export
    Import {
        path: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }
}

/// Parses a date in YYYY-MM-DD or YYYYMMDD form.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::from_str(date_str).or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
}
