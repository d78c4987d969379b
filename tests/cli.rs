use std::io::Write;
use std::process::{Command, Output, Stdio};

fn session(input: &str, args: &[&str]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_embryo"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn prints_stack() {
    let output = session("3 4 +\n.\n", &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "7 \n");
}

#[test]
fn exit_word_succeeds() {
    let output = session("1 2 exit\n3 .\n", &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Exiting...\n");
}

#[test]
fn empty_line_ends_quietly() {
    let output = session("\n1 .\n", &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "");
}

#[test]
fn unknown_word_fails() {
    let output = session("1 2\nfoo\n", &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "stdin:2:Unknown word: foo\n");
}

#[test]
fn capacity_flag() {
    let output = session("1 2 3\n", &["--capacity", "2"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "stdin:1:Stack overflow: 3\n");
}
