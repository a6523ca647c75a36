//! End-to-end tests for the `chords` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::TempDir;

/// A `chords` command isolated from the caller's config files and environment.
fn chords(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("chords").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("CHORDSMITH_CONFIG")
        .env_remove("CHORDSMITH_LOG_LEVEL")
        .env_remove("CHORDSMITH_TOP_MATCHES")
        .env_remove("CHORDSMITH_NEAR_HIT_WEIGHT")
        .env_remove("CHORDSMITH_CANDIDATE_KEYS")
        .env_remove("CHORDSMITH_FLAT_KEYS")
        .env_remove("CHORDSMITH_NO_COLOR")
        .arg("--no-color");
    cmd
}

#[test]
fn derive_from_demo_grid() {
    let home = TempDir::new().unwrap();
    chords(&home)
        .args(["derive", "--key", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Key: C"))
        .stdout(predicate::str::contains("V/ ii   A7"))
        .stdout(predicate::str::contains("vii°    B°"))
        .stdout(predicate::str::contains("♭VII    Bb"));
}

#[test]
fn derive_missing_key_fails() {
    let home = TempDir::new().unwrap();
    chords(&home)
        .args(["derive", "--key", "H"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key 'H' not found"));
}

#[test]
fn derive_reads_table_from_stdin() {
    let home = TempDir::new().unwrap();
    chords(&home)
        .args(["derive", "--key", "G", "--table", "-", "--json"])
        .write_stdin("C\tG\nC\tG\nDm\tAm\nEm\tBm\nF\tC\nG\tD\nAm\tEm\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"five\": \"D\""))
        .stdout(predicate::str::contains("\"five_of_four\": \"G7\""))
        .stdout(predicate::str::contains("\"seven_diminished\": \"F#°\""));
}

#[test]
fn derive_reads_table_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("grid.csv");
    std::fs::write(&path, "C;F\nC;F\nDm;Gm\n").unwrap();

    chords(&home)
        .args(["derive", "--key", "f", "--table"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ii      Gm"))
        .stdout(predicate::str::contains("vii°    E°"));
}

#[test]
fn derive_missing_table_file_fails() {
    let home = TempDir::new().unwrap();
    chords(&home)
        .args(["derive", "--key", "C", "--table", "nope.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.csv"));
}

#[test]
fn match_pop_progression() {
    let home = TempDir::new().unwrap();
    chords(&home)
        .args(["match", "C G Am F"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Best key: C"))
        .stdout(predicate::str::contains("I V vi IV"))
        .stdout(predicate::str::contains("I–V–vi–IV"));
}

#[test]
fn match_empty_input() {
    let home = TempDir::new().unwrap();
    chords(&home)
        .args(["match", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("No chords provided"));
}

#[test]
fn match_json_with_custom_keys() {
    let home = TempDir::new().unwrap();
    let output = chords(&home)
        .args(["match", "Dm7 G7 Cmaj7", "--keys", "G,C", "--top", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["outcome"], "matched");
    assert_eq!(value["best_key"], "C");
    assert_eq!(value["ranked"].as_array().unwrap().len(), 1);
    assert_eq!(value["progressions"][0], "ii–V–I");
}

#[test]
fn config_file_changes_candidates() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("custom.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[theory]\ncandidate_keys = [\"G\"]\ntop_matches = 1").unwrap();

    chords(&home)
        .arg("--config")
        .arg(&path)
        .args(["match", "C G Am F"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Best key: G"));
}

#[test]
fn local_config_file_is_picked_up() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("chordsmith.toml"), "[output]\njson = true\n").unwrap();

    chords(&home)
        .args(["match", "C F G"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\": \"matched\""));
}

#[test]
fn missing_config_path_fails() {
    let home = TempDir::new().unwrap();
    chords(&home)
        .args(["--config", "absent.toml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("absent.toml"));
}

#[test]
fn config_show_sources() {
    let home = TempDir::new().unwrap();
    chords(&home)
        .env("CHORDSMITH_TOP_MATCHES", "3")
        .args(["config", "--show-sources"])
        .assert()
        .success()
        .stdout(predicate::str::contains("env:  CHORDSMITH_TOP_MATCHES"))
        .stdout(predicate::str::contains("top_matches = 3"))
        .stdout(predicate::str::contains("[logging]"));
}
