use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Helper function to set up a test Command instance against an isolated journal
fn set_up_command(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jotter").unwrap();
    cmd.env_clear()
        .env("HOME", "/tmp")
        .env("JOTTER_DIR", data_dir);
    cmd
}

fn write_import_file(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("seed.json");
    fs::write(
        &path,
        r#"[
  {"id": 1, "content": "coffee first", "timestamp": "07:30", "date": "2024-05-01"},
  {"id": 2, "content": "late walk", "timestamp": "21:10", "date": "2024-05-01"},
  {"id": 3, "content": "rainy", "timestamp": "09:00", "date": "2024-05-03"}
]"#,
    )
    .unwrap();
    path
}

#[test]
#[serial]
fn test_cli_no_args() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = set_up_command(temp_dir.path());

    // A subcommand is required
    cmd.assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
#[serial]
fn test_cli_dates_on_empty_journal() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("journal");

    set_up_command(&data_dir)
        .arg("dates")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    // The data directory and database are created on first use
    assert!(data_dir.join("journal.db").exists());
}

#[test]
#[serial]
fn test_cli_write_then_browse() {
    let temp_dir = TempDir::new().unwrap();

    set_up_command(temp_dir.path())
        .arg("write")
        .write_stdin("Dear diary\nquiet day\n")
        .assert()
        .success();

    let output = set_up_command(temp_dir.path())
        .arg("dates")
        .output()
        .unwrap();
    assert!(output.status.success());
    let dates = String::from_utf8(output.stdout).unwrap();
    let dates: Vec<&str> = dates.lines().collect();
    assert_eq!(dates.len(), 1, "one session makes one dated entry");

    set_up_command(temp_dir.path())
        .arg("show")
        .arg(dates[0])
        .assert()
        .success()
        .stdout(predicate::str::contains("    Dear diary\n    quiet day\n"));
}

#[test]
#[serial]
fn test_cli_import_then_show_and_export() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("journal");
    let seed = write_import_file(temp_dir.path());

    set_up_command(&data_dir)
        .arg("import")
        .arg(&seed)
        .assert()
        .success()
        .stderr(predicate::str::contains("Imported 3 entries"));

    set_up_command(&data_dir)
        .arg("dates")
        .assert()
        .success()
        .stdout("2024-05-01\n2024-05-03\n");

    set_up_command(&data_dir)
        .args(["show", "20240501"])
        .assert()
        .success()
        .stdout("07:30\n    coffee first\n\n21:10\n    late walk\n");

    set_up_command(&data_dir)
        .args(["export", "--format", "csv"])
        .assert()
        .success()
        .stdout(
            "Date,Time,Content\n\
             2024-05-01,07:30,coffee first\n\
             2024-05-01,21:10,late walk\n\
             2024-05-03,09:00,rainy\n",
        );
}

#[test]
#[serial]
fn test_cli_export_to_directory() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("journal");
    let seed = write_import_file(temp_dir.path());
    let out_dir = temp_dir.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();

    set_up_command(&data_dir).arg("import").arg(&seed).assert().success();
    set_up_command(&data_dir)
        .args(["export", "-o"])
        .arg(&out_dir)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported 3 entries"));

    let exported = fs::read_to_string(out_dir.join("journal_entries.json")).unwrap();
    assert!(exported.contains("\"content\": \"late walk\""));
}

#[test]
#[serial]
fn test_cli_show_empty_day() {
    let temp_dir = TempDir::new().unwrap();

    set_up_command(temp_dir.path())
        .args(["show", "2023-01-01"])
        .assert()
        .success()
        .stdout("No entries for 2023-01-01\n");
}

#[test]
#[serial]
fn test_cli_invalid_date() {
    let temp_dir = TempDir::new().unwrap();

    set_up_command(temp_dir.path())
        .args(["show", "not-a-date"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
#[serial]
fn test_cli_import_rejects_bad_file() {
    let temp_dir = TempDir::new().unwrap();
    let bad = temp_dir.path().join("notes.txt");
    fs::write(&bad, "not an export").unwrap();

    set_up_command(temp_dir.path())
        .arg("import")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported transfer format"));

    set_up_command(temp_dir.path())
        .arg("dates")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
#[serial]
fn test_cli_relative_data_dir_rejected() {
    Command::cargo_bin("jotter")
        .unwrap()
        .env_clear()
        .env("JOTTER_DIR", "relative/journal")
        .arg("dates")
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute"));
}

#[test]
#[serial]
fn test_cli_json_logs_go_to_stderr() {
    let temp_dir = TempDir::new().unwrap();
    let seed = write_import_file(temp_dir.path());

    set_up_command(temp_dir.path())
        .args(["--log-format", "json", "import"])
        .arg(&seed)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("\"correlation_id\""));
}
