//! Integration tests for the `tw` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BURG: &str = include_str!("../../tw-engine/tests/fixtures/burg.json");

/// Create a temp directory holding the castle world as `burg.json`.
fn test_world() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("burg.json"), BURG).unwrap();
    dir
}

fn tw() -> Command {
    Command::cargo_bin("tw").unwrap()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_summarizes_world() {
    let dir = test_world();
    tw().arg("check")
        .arg(dir.path().join("burg.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"))
        .stdout(predicate::str::contains("Die verfallene Burg"))
        .stdout(predicate::str::contains("Collection"))
        .stdout(predicate::str::contains("puzzles"))
        .stdout(predicate::str::contains("Start: Burghof (hof)"));
}

#[test]
fn check_rejects_dangling_reference() {
    let dir = test_world();
    let broken = BURG.replace("\"targetRoom\": \"kapelle\"", "\"targetRoom\": \"krypta\"");
    assert_ne!(broken, BURG);
    fs::write(dir.path().join("broken.json"), broken).unwrap();

    tw().arg("check")
        .arg(dir.path().join("broken.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a playable world"));
}

#[test]
fn check_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    tw().arg("check")
        .arg(dir.path().join("nirgends.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_prints_opening_and_turns() {
    let dir = test_world();
    tw().arg("play")
        .arg(dir.path().join("burg.json"))
        .write_stdin("nimm fackel\ninventar\nende\nschaue\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Du stehst im verwilderten Burghof."))
        .stdout(predicate::str::contains("Du hast Fackel aufgehoben."))
        .stdout(predicate::str::contains("Du hast dabei: Fackel"))
        // `ende` stops before the last line is read
        .stdout(predicate::str::contains("Du siehst: Alter Brunnen").not());
}

#[test]
fn play_suggests_close_command() {
    let dir = test_world();
    tw().arg("play")
        .arg(dir.path().join("burg.json"))
        .write_stdin("nimn fackel\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Das verstehe ich nicht."))
        .stdout(predicate::str::contains("Meintest du \"nimm fackel\"?"));
}

#[test]
fn play_lists_dialogue_replies() {
    let dir = test_world();
    tw().arg("play")
        .arg(dir.path().join("burg.json"))
        .write_stdin("sprich mit gerold\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Halt!"))
        .stdout(predicate::str::contains("Wo finde ich die Inschrift?"))
        .stdout(predicate::str::contains("Ich habe den Schlüssel.").not());
}

#[test]
fn play_to_victory() {
    let dir = test_world();
    let script = [
        "löse inschrift mit die zeit",
        "o",
        "nimm schlüssel",
        "nimm seil",
        "nimm haken",
        "kombiniere seil mit haken",
        "w",
        "n",
        "gehe hoch",
        "schaue",
    ]
    .join("\n");

    tw().arg("play")
        .arg(dir.path().join("burg.json"))
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Du hast die Burg bezwungen!"))
        .stdout(predicate::str::contains("Gewonnen!"))
        // input after the end of the game is not read
        .stdout(predicate::str::contains("Das Spiel ist vorbei.").not());
}

#[test]
fn play_saves_and_resumes() {
    let dir = test_world();
    let world = dir.path().join("burg.json");
    let save = dir.path().join("stand.json");

    tw().arg("play")
        .arg(&world)
        .arg("--save")
        .arg(&save)
        .write_stdin("nimm fackel\no\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Spielstand gespeichert"));

    let json = fs::read_to_string(&save).unwrap();
    assert!(json.contains("\"currentRoom\": \"schmiede\""));
    assert!(json.contains("\"fackel\""));

    tw().arg("play")
        .arg(&world)
        .arg("--resume")
        .arg(&save)
        .write_stdin("inventar\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("In der alten Schmiede"))
        .stdout(predicate::str::contains("Du hast dabei: Fackel"));
}

#[test]
fn play_rejects_garbage_save() {
    let dir = test_world();
    fs::write(dir.path().join("stand.json"), "kein json").unwrap();
    tw().arg("play")
        .arg(dir.path().join("burg.json"))
        .arg("--resume")
        .arg(dir.path().join("stand.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a save game"));
}

#[test]
fn play_reads_engine_config() {
    let dir = test_world();
    let config = dir.path().join("tw.toml");
    let save = dir.path().join("stand.json");
    fs::write(&config, "[engine]\nadvance_time = false\n").unwrap();

    tw().arg("play")
        .arg(dir.path().join("burg.json"))
        .arg("--config")
        .arg(&config)
        .arg("--save")
        .arg(&save)
        .write_stdin("schaue\nnimm fackel\n")
        .assert()
        .success();

    let json = fs::read_to_string(&save).unwrap();
    assert!(json.contains("\"timeElapsed\": 0"));
}

#[test]
fn play_rejects_invalid_config() {
    let dir = test_world();
    let config = dir.path().join("tw.toml");
    fs::write(&config, "[engine]\nadvance_time = \"ja\"\n").unwrap();

    tw().arg("play")
        .arg(dir.path().join("burg.json"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config file"));
}
