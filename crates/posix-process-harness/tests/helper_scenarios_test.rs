//! Runs `posix-test-helper` scenarios and checks their reports.

use std::path::PathBuf;
use std::process::{Command, Output};

use posix_process::process::wait::{self, Options, Selector};
use posix_process::process::{Classification, Program, Strings};
use posix_process::signal::{Number, send};
use posix_process_harness::config::{FORMAT_VAR, LOG_VAR};
use posix_process_harness::protocol::Report;
use posix_process_harness::structured_log::validate_log_file;

const HELPER: &str = env!("CARGO_BIN_EXE_posix-test-helper");

fn helper(args: &[&str]) -> Command {
    let mut command = Command::new(HELPER);
    command
        .args(args)
        .env_remove(FORMAT_VAR)
        .env_remove(LOG_VAR);
    command
}

fn report_of(output: &Output) -> Report {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().next().unwrap_or_default();
    Report::parse(line).unwrap_or_else(|err| panic!("bad report {line:?}: {err}"))
}

fn report_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn run(args: &[&str]) -> (Report, Output) {
    let output = helper(args).output().unwrap();
    (report_of(&output), output)
}

#[test]
fn exit_reports_identity_and_code() {
    let (report, output) = run(&["exit", "3"]);
    assert_eq!(output.status.code(), Some(3));
    match report {
        Report::Status { ppid, exit, .. } => {
            assert_eq!(ppid, std::process::id() as i32);
            assert_eq!(exit, 3);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn negative_exit_code_keeps_low_eight_bits() {
    let (report, output) = run(&["exit", "-1"]);
    assert_eq!(output.status.code(), Some(255));
    match report {
        Report::Status { exit, .. } => assert_eq!(exit, -1),
        other => panic!("unexpected {other:?}"),
    }

    let (report, output) = run(&["fork-exit", "-2"]);
    assert!(output.status.success(), "{report}");
    match report {
        Report::Forked { child_exit, .. } => assert_eq!(child_exit, 254),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn verify_parent_matches_runner() {
    let me = std::process::id().to_string();
    let (report, output) = run(&["verify-parent", &me]);
    assert!(output.status.success());
    assert!(report.is_ok());

    let (report, output) = run(&["verify-parent", "999999999"]);
    assert_eq!(output.status.code(), Some(1));
    match report {
        Report::Failure {
            errno,
            msg,
            details,
        } => {
            assert_eq!(errno, 0);
            assert_eq!(msg, "ppid_mismatch");
            assert_eq!(
                details[0],
                ("expected".to_string(), "999999999".to_string())
            );
            assert_eq!(details[1], ("actual".to_string(), me));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn create_session_leads_session_and_group() {
    let (report, output) = run(&["create-session"]);
    assert!(output.status.success(), "{report}");
    let pid = report.process().unwrap().raw();
    assert_eq!(report.session().unwrap().raw(), pid);
    assert_eq!(report.group().unwrap().raw(), pid);
}

#[test]
fn double_setsid_second_attempt_is_refused() {
    let (report, output) = run(&["double-setsid"]);
    assert!(output.status.success(), "{report}");
    assert!(report.is_ok());
}

#[test]
fn group_leader_commands_make_pgid_equal_pid() {
    for command in ["become-group-leader", "setpgid-explicit"] {
        let (report, output) = run(&[command]);
        assert!(output.status.success(), "{command}: {report}");
        assert_eq!(
            report.group().unwrap().raw(),
            report.process().unwrap().raw(),
            "{command}"
        );
        // Not a new session: the runner's session is inherited.
        assert_ne!(
            report.session().unwrap().raw(),
            report.process().unwrap().raw(),
            "{command}"
        );
    }
}

#[test]
fn fork_exit_collects_grandchild_code() {
    let (report, output) = run(&["fork-exit", "7"]);
    assert!(output.status.success());
    match report {
        Report::Forked {
            pid,
            child,
            child_exit,
        } => {
            assert!(pid > 0 && child > 0);
            assert_ne!(child, pid);
            assert_eq!(child_exit, 7);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn stop_exit_stops_until_continued() {
    let program = Program::new(
        HELPER,
        Strings::new(["posix-test-helper", "stop-exit", "4"]).unwrap(),
        Strings::from_current_environment(),
    )
    .unwrap();
    let pid = program.spawn().unwrap();

    let stop = wait::wait(Selector::Process(pid), Options::REPORT_STOPPED)
        .unwrap()
        .unwrap();
    assert_eq!(
        stop.status.classification(),
        Classification::Stopped(Number::STOP)
    );

    send::to_process(pid, Number::CONT).unwrap();
    let status = wait::child(pid).unwrap();
    assert_eq!(status.classification(), Classification::Exited(4));
}

#[test]
fn double_setsid_exit_code_through_spawn() {
    let program = Program::new(
        HELPER,
        Strings::new(["posix-test-helper", "double-setsid"]).unwrap(),
        Strings::from_current_environment(),
    )
    .unwrap();
    let pid = program.spawn().unwrap();
    assert_eq!(wait::child(pid).unwrap().exit_code(), Some(0));
}

#[test]
fn json_format_prints_tagged_object() {
    let output = helper(&["exit", "0"])
        .env(FORMAT_VAR, "json")
        .output()
        .unwrap();
    let line = report_line(&output);
    assert!(line.starts_with('{'), "{line}");
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["report"], "status");
    assert!(Report::parse(&line).unwrap().is_ok());
}

#[test]
fn log_variable_appends_valid_records() {
    let path: PathBuf =
        std::env::temp_dir().join(format!("posix-helper-{}.jsonl", std::process::id()));
    let _ = std::fs::remove_file(&path);

    for args in [&["exit", "0"][..], &["verify-parent", "999999999"][..]] {
        helper(args).env(LOG_VAR, &path).output().unwrap();
    }

    let (lines, errors) = validate_log_file(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(lines, 2, "{content}");
    assert!(errors.is_empty(), "{errors:?}");
    assert!(content.contains("\"command\":\"exit\""));
    assert!(content.contains("\"outcome\":\"fail\""));

    let first: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
    assert_eq!(first["details"]["argv"][1], "exit");
    assert_eq!(first["details"]["ppid"], std::process::id());
}
