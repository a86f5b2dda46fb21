use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

const EPOCH: &str = "1970-01-01 00:00:00.000000000 +0000";

/// Test fixture holding input files in a temporary directory
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Write a file and return its path
    fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Command for the binary with a clean environment
fn line_diff() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_line-diff"));
    cmd.env_remove("LINE_DIFF_COLORS")
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR");
    cmd
}

fn run(args: &[&str], files: &[&Path]) -> Output {
    line_diff()
        .args(args)
        .args(files)
        .output()
        .expect("Failed to run line-diff")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn identical_files_exit_zero() {
    let fixture = Fixture::new();
    let left = fixture.write_file("left.txt", "one\ntwo\n");
    let right = fixture.write_file("right.txt", "one\ntwo\n");

    let output = run(&[], &[&left, &right]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "= one\n= two\n");
}

#[test]
fn flat_output_marks_every_line() {
    let fixture = Fixture::new();
    let left = fixture.write_file("left.txt", "removed line\nunchanged line\n");
    let right = fixture.write_file("right.txt", "unchanged line\nadded line\n");

    let output = run(&[], &[&left, &right]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        "> removed line\n= unchanged line\n< added line\n"
    );
}

#[test]
fn unified_output_with_labels() {
    let fixture = Fixture::new();
    let left_lines: Vec<String> = (1..=20).map(|i| format!("line {i}\n")).collect();
    let mut right_lines = left_lines.clone();
    right_lines[5] = "line six\n".to_string();
    let left = fixture.write_file("left.txt", &left_lines.concat());
    let right = fixture.write_file("right.txt", &right_lines.concat());

    // Labels name no real file, so the header falls back to the epoch.
    let output = run(
        &["-u", "--left-label", "a/old", "--right-label", "b/new"],
        &[&left, &right],
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        format!(
            "--- a/old\t{EPOCH}\n+++ b/new\t{EPOCH}\n\
             @@ -3,7 +3,7 @@\n\
             = line 3\n= line 4\n= line 5\n\
             > line 6\n< line six\n\
             = line 7\n= line 8\n= line 9\n"
        )
    );
}

#[test]
fn context_flag_sets_width() {
    let fixture = Fixture::new();
    let left = fixture.write_file("left.txt", "a\nb\nc\nd\ne\nf\ng\n");
    let right = fixture.write_file("right.txt", "a\nb\nC\nd\ne\nf\ng\n");

    let output = run(
        &["-U", "1", "--left-label", "x", "--right-label", "y"],
        &[&left, &right],
    );

    assert_eq!(
        stdout(&output),
        format!("--- x\t{EPOCH}\n+++ y\t{EPOCH}\n@@ -2,3 +2,3 @@\n= b\n> c\n< C\n= d\n")
    );
}

#[test]
fn negative_context_uses_default() {
    let fixture = Fixture::new();
    let left = fixture.write_file("left.txt", "a\nb\nc\nd\ne\nf\ng\nh\n");
    let right = fixture.write_file("right.txt", "a\nb\nc\nd\nE\nf\ng\nh\n");

    let output = run(
        &["-U", "-1", "--left-label", "x", "--right-label", "y"],
        &[&left, &right],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("@@ -2,7 +2,7 @@\n"));
}

#[test]
fn color_always_uses_spec() {
    let fixture = Fixture::new();
    let left = fixture.write_file("left.txt", "old\n");
    let right = fixture.write_file("right.txt", "new\n");

    let output = run(
        &["--color", "always", "--colors", "del=1;31:add=1;32"],
        &[&left, &right],
    );

    assert_eq!(
        stdout(&output),
        "\x1b[1;31m> old\n\x1b[0m\x1b[1;32m< new\n\x1b[0m"
    );
}

#[test]
fn colors_from_environment() {
    let fixture = Fixture::new();
    let left = fixture.write_file("left.txt", "same\n");
    let right = fixture.write_file("right.txt", "same\n");

    let output = line_diff()
        .env("LINE_DIFF_COLORS", "eql=33:rst=39")
        .args(["--color", "always"])
        .arg(&left)
        .arg(&right)
        .output()
        .unwrap();

    assert_eq!(stdout(&output), "\x1b[33m= same\n\x1b[39m");
}

#[test]
fn auto_color_is_off_for_pipes() {
    let fixture = Fixture::new();
    let left = fixture.write_file("left.txt", "old\n");
    let right = fixture.write_file("right.txt", "new\n");

    let output = run(&[], &[&left, &right]);

    assert!(!stdout(&output).contains('\x1b'));
}

#[test]
fn reads_left_side_from_stdin() {
    let fixture = Fixture::new();
    let right = fixture.write_file("right.txt", "a\nb\n");

    let mut child = line_diff()
        .arg("-")
        .arg(&right)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"a\n").unwrap();
    let output = child.wait_with_output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "= a\n< b\n");
}

#[test]
fn missing_file_is_trouble() {
    let fixture = Fixture::new();
    let present = fixture.write_file("present.txt", "x\n");
    let missing = fixture.path("missing.txt");

    let output = run(&[], &[&missing, &present]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("Failed to open"));
}

#[test]
fn invalid_color_spec_is_trouble() {
    let fixture = Fixture::new();
    let left = fixture.write_file("left.txt", "x\n");
    let right = fixture.write_file("right.txt", "x\n");

    let output = run(&["--colors", "moved=35"], &[&left, &right]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Unknown color role 'moved'"));
}

#[test]
fn missing_arguments_is_usage_error() {
    let output = line_diff().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn generates_completions() {
    let output = line_diff().args(["--completions", "bash"]).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("line-diff"));
}

#[test]
fn generates_man_page() {
    let output = line_diff().arg("--man").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(".TH"));
}
