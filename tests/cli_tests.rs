//! CLI integration tests: run the built binary against a scratch data
//! directory with the horoscope API pointed at an unreachable address, so
//! every run is deterministic and offline.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const UNREACHABLE_API: &str = "http://127.0.0.1:9";

fn stellium(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stellium").unwrap();
    cmd.env("STELLIUM_DIR", data_dir.path())
        .env("STELLIUM_API_URL", UNREACHABLE_API)
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    stellium(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("horoscope"))
        .stdout(predicate::str::contains("journal"))
        .stdout(predicate::str::contains("notify"));
}

#[test]
fn signs_lists_all_twelve() {
    let dir = TempDir::new().unwrap();
    let assert = stellium(&dir).arg("signs").assert().success();

    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(output.lines().count(), 12);
    assert!(output.contains("Aries"));
    assert!(output.contains("Pisces"));
}

#[test]
fn horoscope_offline_serves_fallback() {
    let dir = TempDir::new().unwrap();
    stellium(&dir)
        .args(["horoscope", "--sign", "aries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("aries"))
        .stdout(predicate::str::contains("offline fallback"));
}

#[test]
fn horoscope_without_sign_uses_the_default() {
    let dir = TempDir::new().unwrap();
    stellium(&dir)
        .args(["horoscope", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults to aries"));

    stellium(&dir)
        .arg("horoscope")
        .assert()
        .success()
        .stdout(predicate::str::contains("aries"));
}

#[test]
fn horoscope_rejects_unknown_sign() {
    let dir = TempDir::new().unwrap();
    stellium(&dir)
        .args(["horoscope", "--sign", "dragon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch horoscope"));
}

#[test]
fn journal_add_then_list_round_trip() {
    let dir = TempDir::new().unwrap();

    stellium(&dir)
        .args(["journal", "add", "A quiet day", "--mood", "calm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved entry"));

    stellium(&dir)
        .args(["journal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A quiet day"))
        .stdout(predicate::str::contains("[calm]"));
}

#[test]
fn journal_edit_unknown_id_reports_miss() {
    let dir = TempDir::new().unwrap();
    stellium(&dir)
        .args(["journal", "edit", "no-such-id", "new text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entry with id"));
}

#[test]
fn journal_clear_empties_the_list() {
    let dir = TempDir::new().unwrap();

    stellium(&dir)
        .args(["journal", "add", "soon gone"])
        .assert()
        .success();
    stellium(&dir)
        .args(["journal", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 entries"));
    stellium(&dir)
        .args(["journal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No journal entries yet."));
}

#[test]
fn notify_preferences_persist_between_runs() {
    let dir = TempDir::new().unwrap();

    stellium(&dir)
        .args(["notify", "enable", "--time", "18:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled at 18:30"));

    stellium(&dir)
        .args(["notify", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled: true"))
        .stdout(predicate::str::contains("time: 18:30"));

    // Disable keeps the chosen time.
    stellium(&dir).args(["notify", "disable"]).assert().success();
    stellium(&dir)
        .args(["notify", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled: false"))
        .stdout(predicate::str::contains("time: 18:30"));
}

#[test]
fn notify_rejects_bad_time() {
    let dir = TempDir::new().unwrap();
    stellium(&dir)
        .args(["notify", "time", "25:99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not a valid HH:mm time"));
}
