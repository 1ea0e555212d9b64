use std::process::{Command, Output};

fn vspawn(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vspawn"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_default_program_is_ls() {
    let output = vspawn(&[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).ends_with("Helper: Exited, status=0\n"));
}

#[test]
fn test_reports_exit_code() {
    let output = vspawn(&["/bin/sh", "-c", "exit 3"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Helper: Exited, status=3\n");
}

#[test]
fn test_reports_signal() {
    let output = vspawn(&["--fork", "/bin/sh", "-c", "kill -TERM $$"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Helper: Killed by signal 15 (SIGTERM)\n");
}

#[test]
fn test_environment_and_cwd_reach_the_program() {
    let output = vspawn(&[
        "-C",
        "/",
        "-e",
        "GREETING=hi",
        "/bin/sh",
        "-c",
        "test \"$GREETING\" = hi && test \"$(pwd)\" = / && exit 9",
    ]);
    assert_eq!(stdout(&output), "Helper: Exited, status=9\n");
}

#[test]
fn test_setup_failure_exits_1() {
    let output = vspawn(&["/nonexistent/vspawn-helper"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    let stderr = stderr(&output);
    assert!(stderr.starts_with("ERROR: Unable to run helper: child failed to execute the program"));
    assert!(stderr.contains("(exit code 3)"));
}

#[test]
fn test_usage_error_exits_2() {
    let output = vspawn(&["--bogus"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("ERROR: "));
}

#[test]
fn test_verbose_prints_request() {
    let output = vspawn(&["-v", "-e", "A=1", "/bin/true"]);
    assert_eq!(output.status.code(), Some(0));
    let stderr = stderr(&output);
    assert!(stderr.contains("vspawn: vfork /bin/true"));
    assert!(stderr.contains("argv[0] = /bin/true"));
    assert!(stderr.contains("env A=1"));
}

#[test]
fn test_help() {
    let output = vspawn(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).starts_with("Usage: vspawn"));
}
