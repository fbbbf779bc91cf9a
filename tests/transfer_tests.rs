//! Integration tests for export and import.
//!
//! These tests verify that an export read back into an empty journal yields
//! the same entries, and that a bad file leaves the journal untouched.

use jotter::db::{Database, NewEntry};
use jotter::errors::{AppError, TransferError};
use jotter::ops::{self, TransferFormat};
use std::fs;
use tempfile::TempDir;

fn setup_db() -> Database {
    let db = Database::open_in_memory().expect("open database");
    db.initialize_schema().expect("initialize schema");
    db
}

fn seed(db: &Database) {
    db.create_entry("First thought", "07:15", "2024-01-15").expect("create");
    db.create_entry("Line one\nline two, with a comma", "12:00", "2024-01-15")
        .expect("create");
    db.create_entry("She said \"enough\"", "23:59", "2024-01-16")
        .expect("create");
}

fn records(db: &Database) -> Vec<NewEntry> {
    db.list_all_entries()
        .expect("list entries")
        .into_iter()
        .map(NewEntry::from)
        .collect()
}

fn round_trip(format: TransferFormat) {
    let temp_dir = TempDir::new().expect("create temp dir");
    let source = setup_db();
    seed(&source);

    let (path, exported) = ops::export_to_path(&source, format, temp_dir.path()).expect("export");
    assert_eq!(exported, 3);
    assert_eq!(path, temp_dir.path().join(format.default_file_name()));

    let target = setup_db();
    let imported = ops::import_file(&target, &path).expect("import");
    assert_eq!(imported, 3);
    assert_eq!(records(&target), records(&source));
}

#[test]
fn test_json_round_trip() {
    round_trip(TransferFormat::Json);
}

#[test]
fn test_csv_round_trip() {
    round_trip(TransferFormat::Csv);
}

#[test]
fn test_import_mints_new_ids() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("entries.json");
    fs::write(
        &path,
        r#"[{"id": 99, "content": "imported", "timestamp": "8:05", "date": "2024-02-01"}]"#,
    )
    .expect("write file");

    let db = setup_db();
    db.create_entry("existing", "09:00", "2024-02-01").expect("create");
    ops::import_file(&db, &path).expect("import");

    let entries = db.list_all_entries().expect("list entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].id, 2);
    assert_eq!(entries[1].timestamp, "08:05");
}

#[test]
fn test_invalid_record_imports_nothing() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("entries.csv");
    fs::write(
        &path,
        "Date,Time,Content\n2024-01-01,09:00,fine\n2024-13-40,10:00,broken\n",
    )
    .expect("write file");

    let db = setup_db();
    let err = ops::import_file(&db, &path).unwrap_err();
    assert!(matches!(
        err,
        AppError::Transfer(TransferError::InvalidRecord { index: 1, .. })
    ));
    assert!(db.list_all_entries().expect("list entries").is_empty());
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("entries.txt");
    fs::write(&path, "whatever").expect("write file");

    let db = setup_db();
    let err = ops::import_file(&db, &path).unwrap_err();
    assert!(matches!(
        err,
        AppError::Transfer(TransferError::UnsupportedFormat(_))
    ));
}
