use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn pwords_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pwords").expect("Failed to find pwords binary");
    // Keep the environment from changing defaults under test.
    for var in [
        "PWORDS_FORMAT",
        "PWORDS_SORT",
        "PWORDS_TOP",
        "PWORDS_MIN_LEN",
        "PWORDS_MAX_LEN",
    ] {
        cmd.env_remove(var);
    }
    cmd.arg("--no-color");
    cmd
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("failed to execute");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn single_file_sorted_by_count_then_word() {
    let mut cmd = pwords_cmd();
    cmd.arg(fixtures_dir().join("quick_fox.txt"));

    cmd.assert()
        .success()
        .stdout("2\tthe\n1\tfox\n1\tquick\n")
        .stderr("");
}

#[test]
fn two_files_are_merged() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("one.txt"), "a b");
    write_file(&temp.path().join("two.txt"), "a c");

    let mut cmd = pwords_cmd();
    cmd.arg("--min-len")
        .arg("1")
        .arg(temp.path().join("one.txt"))
        .arg(temp.path().join("two.txt"));

    cmd.assert().success().stdout("2\ta\n1\tb\n1\tc\n");
}

#[test]
fn reads_stdin_without_files() {
    let mut cmd = pwords_cmd();
    cmd.write_stdin("Hello hello WORLD");

    cmd.assert().success().stdout("2\thello\n1\tworld\n");
}

#[test]
fn dash_means_stdin() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "file words");

    let mut cmd = pwords_cmd();
    cmd.arg("-").arg(temp.path().join("a.txt")).write_stdin("stdin words");

    cmd.assert()
        .success()
        .stdout("2\twords\n1\tfile\n1\tstdin\n");
}

#[test]
fn missing_file_is_reported_and_others_still_counted() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("good.txt"), "still counted counted");

    let mut cmd = pwords_cmd();
    cmd.arg(temp.path().join("good.txt"))
        .arg(temp.path().join("missing.txt"));

    cmd.assert()
        .failure()
        .code(1)
        .stdout("2\tcounted\n1\tstill\n")
        .stderr(predicate::str::contains("missing.txt"))
        .stderr(predicate::str::contains("SOURCE_UNAVAILABLE"));
}

#[test]
fn directory_argument_is_a_failed_source() {
    let temp = tempdir().unwrap();

    let mut cmd = pwords_cmd();
    cmd.arg(temp.path()).arg(fixtures_dir().join("quick_fox.txt"));

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("2\tthe\n"))
        .stderr(predicate::str::contains("is a directory"));
}

#[test]
fn empty_file_gives_empty_report() {
    let mut cmd = pwords_cmd();
    cmd.arg(fixtures_dir().join("empty.txt"));

    cmd.assert().success().stdout("");
}

#[test]
fn top_and_jsonl_format() {
    let mut cmd = pwords_cmd();
    cmd.arg("--format")
        .arg("jsonl")
        .arg("--top")
        .arg("3")
        .arg(fixtures_dir().join("alice.txt"));

    let stdout = stdout_of(&mut cmd);
    let items: Vec<Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid jsonl line"))
        .collect();

    let words: Vec<(&str, u64)> = items
        .iter()
        .map(|v| (v["word"].as_str().unwrap(), v["count"].as_u64().unwrap()))
        .collect();
    assert_eq!(words, vec![("of", 3), ("or", 3), ("the", 3)]);
}

#[test]
fn json_format_is_one_array() {
    let mut cmd = pwords_cmd();
    cmd.arg("--format")
        .arg("json")
        .arg(fixtures_dir().join("alice.txt"));

    let value: Value = serde_json::from_str(&stdout_of(&mut cmd)).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 39);
}

#[test]
fn markdown_format_is_a_table() {
    let mut cmd = pwords_cmd();
    cmd.arg("--format").arg("md").write_stdin("the quick fox the");

    let expected = "| count | word |\n\
                    |------:|------|\n\
                    | 2 | `the` |\n\
                    | 1 | `fox` |\n\
                    | 1 | `quick` |\n";
    cmd.assert().success().stdout(expected);
}

#[test]
fn markdown_format_empty_input_prints_nothing() {
    let mut cmd = pwords_cmd();
    cmd.arg("--format")
        .arg("markdown")
        .arg(fixtures_dir().join("empty.txt"));

    cmd.assert().success().stdout("");
}

#[test]
fn same_output_every_run() {
    let fixtures = fixtures_dir();
    let run = || {
        let mut cmd = pwords_cmd();
        cmd.arg(fixtures.join("alice.txt"))
            .arg(fixtures.join("quick_fox.txt"))
            .arg(fixtures.join("alice.txt"));
        stdout_of(&mut cmd)
    };

    let first = run();
    assert!(first.starts_with("8\tthe\n6\tof\n6\tor\n"));
    for _ in 0..5 {
        assert_eq!(run(), first);
    }
}

#[test]
fn sort_by_word_and_keep_case() {
    let mut cmd = pwords_cmd();
    cmd.arg("--sort")
        .arg("word")
        .arg("--keep-case")
        .write_stdin("beta Alpha beta alpha");

    cmd.assert()
        .success()
        .stdout("1\tAlpha\n1\talpha\n2\tbeta\n");
}

#[test]
fn env_configures_defaults() {
    let mut cmd = pwords_cmd();
    cmd.env("PWORDS_MIN_LEN", "1")
        .env("PWORDS_TOP", "1")
        .write_stdin("a a b");

    cmd.assert().success().stdout("2\ta\n");
}

#[test]
fn verbose_prints_summary_on_stderr() {
    let mut cmd = pwords_cmd();
    cmd.arg("--verbose").arg(fixtures_dir().join("quick_fox.txt"));

    cmd.assert()
        .success()
        .stdout("2\tthe\n1\tfox\n1\tquick\n")
        .stderr(predicate::str::contains("1 sources, 0 failed, 4 words, 3 distinct"));
}

#[test]
fn invalid_format_is_an_error() {
    let mut cmd = pwords_cmd();
    cmd.arg("--format").arg("xml").write_stdin("");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format"));
}
