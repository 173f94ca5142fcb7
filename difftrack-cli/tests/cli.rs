//! end-to-end tests against the compiled `difftrack` binary (grounded on the
//! `assert_cmd` dev-dependency the teacher's `bit/Cargo.toml` also declares).

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

fn difftrack() -> Command {
    Command::cargo_bin("difftrack").unwrap()
}

#[test]
fn init_tracks_every_data_file_and_prints_a_summary() {
    let src = tempdir().unwrap();
    fs::write(src.path().join("a.json"), r#"{"x":1}"#).unwrap();

    let dest = tempdir().unwrap();
    let project_path = dest.path().join("proj");

    difftrack()
        .args(["init", src.path().to_str().unwrap(), "-C", project_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("tracking 1 file(s)"));
}

#[test]
fn timeline_shows_a_new_version_after_a_watch_tick_observes_a_change() {
    let src = tempdir().unwrap();
    let file = src.path().join("a.json");
    fs::write(&file, r#"{"x":1}"#).unwrap();

    let dest = tempdir().unwrap();
    let project_path = dest.path().join("proj");

    difftrack()
        .args(["init", src.path().to_str().unwrap(), "-C", project_path.to_str().unwrap()])
        .assert()
        .success();

    difftrack()
        .args(["timeline", project_path.to_str().unwrap(), file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("version 0"))
        .stdout(contains("version 1").not());

    fs::write(&file, r#"{"x":2}"#).unwrap();
    difftrack()
        .args(["watch", project_path.to_str().unwrap(), "--once"])
        .assert()
        .success();

    difftrack()
        .args(["timeline", project_path.to_str().unwrap(), file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("version 1"));
}

#[test]
fn diff_compares_two_arbitrary_snapshot_indices() {
    let src = tempdir().unwrap();
    let file = src.path().join("a.json");
    fs::write(&file, r#"{"x":1}"#).unwrap();

    let dest = tempdir().unwrap();
    let project_path = dest.path().join("proj");
    difftrack()
        .args(["init", src.path().to_str().unwrap(), "-C", project_path.to_str().unwrap()])
        .assert()
        .success();

    fs::write(&file, r#"{"x":2}"#).unwrap();
    difftrack().args(["watch", project_path.to_str().unwrap(), "--once"]).assert().success();

    difftrack()
        .args(["diff", project_path.to_str().unwrap(), file.to_str().unwrap(), "0", "1"])
        .assert()
        .success();
}
