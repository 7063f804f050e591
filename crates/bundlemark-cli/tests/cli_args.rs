use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("bundlemark").unwrap()
}

#[test]
fn help_flag_prints_usage_with_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("overlay"))
        .stdout(predicate::str::contains("palette"))
        .stdout(predicate::str::contains("transform"));
}

#[test]
fn replay_subcommand_help() {
    cmd()
        .args(["replay", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--pages"))
        .stdout(predicate::str::contains("--document"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn overlay_subcommand_help() {
    cmd()
        .args(["overlay", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--page-height"))
        .stdout(predicate::str::contains("--scale"));
}

#[test]
fn no_subcommand_fails() {
    cmd().assert().failure();
}

#[test]
fn invalid_format_rejected() {
    cmd()
        .args(["palette", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}
