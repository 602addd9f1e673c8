//! End-to-end shell sessions over the spawned binary's stdin/stdout.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use registrar::exit_codes;
use registrar::io::store::load_records;

fn run_shell(dir: &Path, script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_registrar"))
        .current_dir(dir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn registrar");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(script.as_bytes())
        .expect("write script");
    child.wait_with_output().expect("wait for registrar")
}

#[test]
fn full_session_persists_course_student_and_grade() {
    let temp = tempfile::tempdir().expect("tempdir");
    let script = "6\nCS101\nIntro to Computer Science\n3\nKnuth\n\
                  1\nGrace\nHopper\ngrace@navy.mil\n1906-12-09\n\
                  9\n1000\nCS101\n\
                  10\n1000\nCS101\nA\n\
                  11\n1000\n\
                  0\n";

    let output = run_shell(temp.path(), script);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Student added with id 1000."));
    assert!(stdout.contains("STUDENT REPORT: Grace Hopper"));
    assert!(stdout.contains("Overall GPA: 4.00"));
    assert!(stdout.contains("Goodbye."));

    let book = load_records(&temp.path().join("student_data.json")).expect("load");
    let student = &book.students["1000"];
    assert_eq!(student.grades[0].value, "A");
    assert!(book.courses.contains_key("CS101"));
}

#[test]
fn corrupt_data_file_falls_back_to_empty_book() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(temp.path().join("student_data.json"), "{ not json").expect("write");

    let output = run_shell(temp.path(), "2\n0\n");
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning"));
    assert!(stderr.contains("empty record book"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("0 student(s)"));
}

#[test]
fn zero_byte_data_file_starts_empty_without_warning() {
    let temp = tempfile::tempdir().expect("tempdir");
    std::fs::write(temp.path().join("student_data.json"), "").expect("write");

    let output = run_shell(temp.path(), "0\n");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("warning"));
}

#[test]
fn end_of_input_without_quit_exits_zero() {
    let temp = tempfile::tempdir().expect("tempdir");
    let output = run_shell(temp.path(), "");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
}
