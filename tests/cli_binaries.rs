//! Exercises the `trng-playlist` binary end to end.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use test_support::{joined, tree};

fn trng_playlist() -> Command {
    Command::new(env!("CARGO_BIN_EXE_trng-playlist"))
}

fn read_lines(path: &Path) -> Vec<PathBuf> {
    std::fs::read_to_string(path)
        .expect("read playlist")
        .lines()
        .map(PathBuf::from)
        .collect()
}

#[test]
fn help_lists_required_parameters() {
    trng_playlist()
        .arg("--help")
        .assert()
        .success()
        .stderr(predicate::str::is_empty())
        .stdout(contains("Required parameters:").and(contains("--dir")));
}

#[test]
fn version_names_the_program() {
    trng_playlist()
        .arg("-v")
        .assert()
        .success()
        .stdout(contains(format!(
            "trng-playlist, version {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn missing_arguments_exit_with_syntax_error() {
    trng_playlist()
        .assert()
        .code(1)
        .stderr(contains("music repo path missing!").and(contains("Typical usage")));
}

#[test]
fn urandom_playlist_contains_every_file_once() {
    if !Path::new("/dev/urandom").exists() {
        return;
    }
    let files = ["01.flac", "02.flac", "disc2/03.flac", "disc2/04.mp3", "notes.txt"];
    let music = tree(&files).expect("tree");
    let out_dir = tempfile::tempdir().expect("tempdir");
    let output = out_dir.path().join("random.m3u");

    trng_playlist()
        .arg("--dir")
        .arg(music.path())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let lines = read_lines(&output);
    assert_eq!(lines.len(), files.len());
    let unique: BTreeSet<_> = lines.into_iter().collect();
    let expected: BTreeSet<_> = joined(music.path(), &files).into_iter().collect();
    assert_eq!(unique, expected);
}

#[test]
fn list_prints_traversal_order() {
    let music = tree(&["b", "a", "sub/c"]).expect("tree");
    let expected: String = joined(music.path(), &["a", "b", "sub/c"])
        .iter()
        .map(|path| format!("{}\n", path.display()))
        .collect();

    trng_playlist()
        .arg("--list")
        .arg("-d")
        .arg(music.path())
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn missing_device_exits_with_entropy_code() {
    let music = tree(&["a"]).expect("tree");
    trng_playlist()
        .arg("-d")
        .arg(music.path())
        .args(["-o", "-", "-e", "/definitely/not/a/device"])
        .assert()
        .code(5)
        .stderr(contains("failed to open entropy device"));
}

#[test]
fn urandom_runs_differ_between_invocations() {
    if !Path::new("/dev/urandom").exists() {
        return;
    }
    let names: Vec<String> = (0..24).map(|track| format!("{track:02}.ogg")).collect();
    let entries: Vec<&str> = names.iter().map(String::as_str).collect();
    let music = tree(&entries).expect("tree");

    let shuffle = || {
        trng_playlist()
            .arg("-d")
            .arg(music.path())
            .args(["-o", "-"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    let first = shuffle();
    let second = shuffle();
    assert_eq!(first.iter().filter(|&&byte| byte == b'\n').count(), 24);
    // 24! orderings make a repeat practically impossible.
    assert_ne!(first, second);
}
