//! Integration tests for the `palette` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("bundlemark").unwrap()
}

#[test]
fn text_lists_all_colors() {
    cmd()
        .arg("palette")
        .assert()
        .success()
        .stdout(predicate::str::contains("name\thex\tr\tg\tb\topacity"))
        .stdout(predicate::str::contains("Yellow\t#FFFF00\t1.000\t1.000\t0.000\t0.30"))
        .stdout(predicate::str::contains("Green"))
        .stdout(predicate::str::contains("Blue"))
        .stdout(predicate::str::contains("Pink"))
        .stdout(predicate::str::contains("Orange"));
}

#[test]
fn json_palette_is_highlight_styles() {
    let output = cmd().args(["palette", "--format", "json"]).output().unwrap();
    assert!(output.status.success());
    let styles: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(styles.len(), 5);
    assert_eq!(styles[0]["color_name"], "Yellow");
    assert_eq!(styles[0]["color_hex"], "#FFFF00");
    assert_eq!(styles[0]["color_rgb"]["b"], 0.0);
}

#[test]
fn csv_palette() {
    cmd()
        .args(["palette", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("name,hex,r,g,b,opacity\n"));
}
