//! Binary-level CLI tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn numclip() -> Command {
    Command::cargo_bin("numclip").expect("binary builds")
}

#[test]
fn help_describes_the_tool() {
    numclip()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("labeled"))
        .stdout(predicate::str::contains("--merge-gap-ms"));
}

#[test]
fn version_prints_and_exits() {
    numclip()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("numclip"));
}

#[test]
fn rejects_out_of_range_threshold() {
    numclip()
        .args(["-t", "2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold must be between"));
}

#[test]
fn rejects_negative_merge_gap() {
    numclip()
        .args(["--merge-gap-ms", "-5"])
        .assert()
        .failure();
}

#[test]
fn rejects_oversized_merge_gap() {
    numclip()
        .args(["--merge-gap-ms", "100000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot exceed"));
}

#[test]
fn missing_source_dir_aborts_before_processing() {
    let home = tempfile::tempdir().expect("tempdir");
    numclip()
        .env("HOME", home.path())
        .env_remove("NUMCLIP_MODEL")
        .args(["-q", "/definitely/not/a/real/assets/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn config_path_prints_toml_location() {
    let home = tempfile::tempdir().expect("tempdir");
    numclip()
        .env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_init_creates_file_once() {
    let home = tempfile::tempdir().expect("tempdir");

    numclip()
        .env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    numclip()
        .env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn config_show_prints_defaults() {
    let home = tempfile::tempdir().expect("tempdir");
    numclip()
        .env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("detector"));
}
