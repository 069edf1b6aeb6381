use rusqlite::Connection;
use std::fs;
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

const USAGE_LINE: &str = "usage: wally path/to/image.jpg\n";

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_wally")
}

fn wally(home: &TempDir, args: &[&str]) -> Output {
    Command::new(bin())
        .env("HOME", home.path())
        .current_dir(home.path())
        .args(args)
        .output()
        .unwrap()
}

fn home_with_db() -> TempDir {
    let home = tempdir().unwrap();
    let dock = home.path().join("Library/Application Support/Dock");
    fs::create_dir_all(&dock).unwrap();
    let conn = Connection::open(dock.join("desktoppicture.db")).unwrap();
    conn.execute_batch(
        "CREATE TABLE data (value);
         CREATE TABLE pictures (space_id INTEGER, display_id INTEGER);
         CREATE TABLE preferences (key INTEGER, data_id INTEGER, picture_id INTEGER);
         INSERT INTO pictures VALUES (1, 1);
         INSERT INTO pictures VALUES (2, 1);
         INSERT INTO data (value) VALUES ('/old.png');
         INSERT INTO preferences VALUES (1, 1, 1);
         INSERT INTO preferences VALUES (1, 1, 2);",
    )
    .unwrap();
    home
}

fn stored_rows(home: &TempDir) -> (Vec<String>, i64) {
    let conn = Connection::open(
        home.path()
            .join("Library/Application Support/Dock/desktoppicture.db"),
    )
    .unwrap();
    let mut stmt = conn.prepare("SELECT value FROM data").unwrap();
    let values = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    let prefs = conn
        .query_row("SELECT COUNT(*) FROM preferences", [], |row| row.get(0))
        .unwrap();
    (values, prefs)
}

#[test]
fn no_arguments_prints_usage_to_stdout_and_fails() {
    let home = home_with_db();
    let output = wally(&home, &[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), USAGE_LINE);
    assert_eq!(stored_rows(&home), (vec!["/old.png".to_string()], 2));
}

#[test]
fn two_arguments_print_usage_to_stdout_and_fail() {
    let home = home_with_db();
    fs::write(home.path().join("a.png"), b"").unwrap();
    fs::write(home.path().join("b.png"), b"").unwrap();
    let output = wally(&home, &["a.png", "b.png"]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), USAGE_LINE);
    assert_eq!(stored_rows(&home), (vec!["/old.png".to_string()], 2));
}

#[test]
fn missing_image_fails_without_touching_the_store() {
    let home = home_with_db();
    let missing = home.path().join("missing.png");
    let output = wally(&home, &[missing.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("[path-not-found]"));
    assert_eq!(stored_rows(&home), (vec!["/old.png".to_string()], 2));
}

#[test]
fn missing_database_is_reported_as_a_store_failure() {
    let home = tempdir().unwrap();
    fs::write(home.path().join("wall.png"), b"").unwrap();
    let output = wally(&home, &["~/wall.png"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("[preference-store] Could not update desktoppicture.db"));
    assert!(!home
        .path()
        .join("Library/Application Support/Dock/desktoppicture.db")
        .exists());
}
